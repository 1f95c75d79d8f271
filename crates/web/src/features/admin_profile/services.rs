use sqlx::PgPool;
use storage::{
    error::Result,
    models::{Account, Role},
    repository::account::AccountRepository,
};

use crate::auth::principal::Principal;

pub async fn get_admin(pool: &PgPool, principal: &Principal) -> Result<Account> {
    AccountRepository::new(pool)
        .find_by_id(Role::Admin, principal.account_id)
        .await
}

pub async fn rename_admin(pool: &PgPool, principal: &Principal, name: &str) -> Result<Account> {
    AccountRepository::new(pool)
        .update_name(Role::Admin, principal.account_id, name)
        .await
}
