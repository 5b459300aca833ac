use sea_orm_migration::prelude::*;

/// Migration CLI; reads `DATABASE_URL` (e.g. `cargo run -p migration -- up`).
#[tokio::main]
async fn main() {
    cli::run_cli(migration::Migrator).await;
}
