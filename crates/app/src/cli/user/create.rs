use clap::Args;
use storefront_app::{
    auth::{PgUsersService, UserUuid, UsersService, data::NewUser},
    database::{self, Db},
};
use zeroize::Zeroizing;

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Login name
    #[arg(long)]
    username: String,

    /// Contact email, unique ignoring case
    #[arg(long)]
    email: String,

    /// Plaintext password; hashed with bcrypt before storage
    #[arg(long, env = "STOREFRONT_USER_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgUsersService::new(Db::new(pool));

    let user = service
        .create_user(NewUser {
            uuid: UserUuid::new(),
            username: args.username,
            email: args.email,
            password: Zeroizing::new(args.password),
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("username: {}", user.username);
    println!("email: {}", user.email);

    Ok(())
}
