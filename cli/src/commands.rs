use crate::cli::{AccountsCommand, Command, PageArgs, PasswordCommand, UsersCommand};
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use chatadmin_client::SessionGateway;
use chatadmin_client::connection::Connection;
use chatadmin_client::errors::GatewayResult;
use chatadmin_client::model::{
    ApiResponse, BusinessAccount, BusinessAccountStatus, ErrorItem, Role, UserRegisterModel,
};
use chatadmin_client::session::{Session, SessionStatus};
use serde::Serialize;
use std::io::Write;

/// Source of passwords that were not given on the command line.
pub trait PasswordSource {
    fn password(&self, prompt: &str) -> AppResult<String>;
}

/// Reads passwords from the terminal without echo.
pub struct TerminalPasswordSource;

impl PasswordSource for TerminalPasswordSource {
    fn password(&self, prompt: &str) -> AppResult<String> {
        Ok(rpassword::prompt_password(prompt)?)
    }
}

/// Executes `command` against `gateway`, writing results to `out`.
pub async fn run(
    command: Command,
    config: &AppConfig,
    gateway: &SessionGateway,
    passwords: &dyn PasswordSource,
    out: &mut dyn Write,
) -> AppResult<()> {
    match command {
        Command::Connect { url } => {
            gateway
                .configure_connection(Some(Connection::new(url)))
                .await?;
            let base = gateway.base_url().await.unwrap_or_default();
            writeln!(out, "Connected to {base}")?;
        }
        Command::Disconnect => {
            gateway.configure_connection(None).await?;
            writeln!(out, "Connection removed")?;
        }
        Command::Login { username, password } => {
            let password = match password {
                Some(password) => password,
                None => passwords.password("Password: ")?,
            };
            login(gateway, &username, &password, out).await?;
        }
        Command::Status { force } => match gateway.session_status(force).await? {
            SessionStatus::Valid(session) => {
                writeln!(out, "Logged in ({})", describe_roles(&session.roles))?;
            }
            SessionStatus::Invalid(reason) => writeln!(out, "Not logged in: {reason}")?,
            SessionStatus::NotConfigured => writeln!(out, "No server connection configured")?,
        },
        Command::Whoami => {
            let session = require_session(gateway).await?;
            print_json(out, &session_summary(&session))?;
        }
        Command::Logout => {
            if let Some(notify) = gateway.logout().await? {
                if let Err(e) = notify.await {
                    log::debug!("Logout notification task failed: {e}");
                }
            }
            writeln!(out, "Logged out")?;
        }
        Command::Roles => {
            require_session(gateway).await?;
            let result = gateway.list_roles().await;
            finish(gateway, result, "Roles", "Could not load roles.", out)?;
        }
        Command::Accounts(command) => {
            require_session(gateway).await?;
            run_accounts(command, config, gateway, out).await?;
        }
        Command::Users(command) => {
            require_session(gateway).await?;
            run_users(command, config, gateway, passwords, out).await?;
        }
        Command::Password(command) => {
            require_session(gateway).await?;
            run_password(command, gateway, passwords, out).await?;
        }
    }
    Ok(())
}

async fn login(
    gateway: &SessionGateway,
    username: &str,
    password: &str,
    out: &mut dyn Write,
) -> AppResult<()> {
    let response = match gateway.login(username, password).await {
        Ok(response) => response,
        Err(e) => {
            gateway.report_error(&e, "Login failed", "Could not reach the server.");
            return Err(e.into());
        }
    };

    let session = match response {
        ApiResponse {
            success: true,
            data: Some(session),
            ..
        } if session.has_token() => session,
        ApiResponse { error, .. } => {
            return Err(reject(gateway, error, "Login failed", "Invalid username or password."));
        }
    };

    let roles = describe_roles(&session.roles);
    gateway.adopt_session(session).await?;
    writeln!(out, "Logged in as {username} ({roles})")?;
    Ok(())
}

async fn run_accounts(
    command: AccountsCommand,
    config: &AppConfig,
    gateway: &SessionGateway,
    out: &mut dyn Write,
) -> AppResult<()> {
    match command {
        AccountsCommand::List { paging } => {
            let (page, size) = resolve_paging(paging, config);
            let result = gateway.list_business_accounts(page, size).await;
            finish(gateway, result, "Business accounts", "Could not load accounts.", out)
        }
        AccountsCommand::Show { id } => {
            let result = gateway.business_account(&id).await;
            finish(gateway, result, "Business account", "Could not load the account.", out)
        }
        AccountsCommand::Save { id, name, email } => {
            let account = BusinessAccount {
                id,
                email,
                ..BusinessAccount::new(name)
            };
            let result = gateway.save_business_account(&account).await;
            finish(gateway, result, "Save account", "Could not save the account.", out)
        }
        AccountsCommand::Status { id, status } => {
            let status = BusinessAccountStatus::from_name(&status).ok_or_else(|| {
                AppError::Config(format!(
                    "unknown status '{status}', expected one of: {}",
                    BusinessAccountStatus::ALL.map(|s| s.as_str()).join(", ")
                ))
            })?;
            let account = BusinessAccount {
                id: Some(id),
                ..BusinessAccount::default()
            };
            let result = gateway
                .update_business_account_status(&account, status)
                .await;
            finish(gateway, result, "Account status", "Could not change the status.", out)
        }
    }
}

async fn run_users(
    command: UsersCommand,
    config: &AppConfig,
    gateway: &SessionGateway,
    passwords: &dyn PasswordSource,
    out: &mut dyn Write,
) -> AppResult<()> {
    match command {
        UsersCommand::List {
            business_id,
            paging,
        } => {
            let (page, size) = resolve_paging(paging, config);
            let result = gateway.list_users(&business_id, page, size).await;
            finish(gateway, result, "Users", "Could not load users.", out)
        }
        UsersCommand::Create {
            username,
            business_id,
            roles,
            password,
        } => {
            let password = match password {
                Some(password) => password,
                None => passwords.password("Password for new user: ")?,
            };
            let model = UserRegisterModel {
                username,
                password,
                business_id,
                roles: roles.into_iter().map(Role::new).collect(),
                ..UserRegisterModel::default()
            };
            let result = gateway.create_user(&model).await;
            finish(gateway, result, "Create user", "Could not create the user.", out)
        }
    }
}

async fn run_password(
    command: PasswordCommand,
    gateway: &SessionGateway,
    passwords: &dyn PasswordSource,
    out: &mut dyn Write,
) -> AppResult<()> {
    match command {
        PasswordCommand::Set { user_id } => {
            let new_password = passwords.password("New password: ")?;
            let result = gateway.update_password(&user_id, &new_password).await;
            finish_silently(gateway, result, "Set password", "Could not set the password.")?;
            writeln!(out, "Password updated")?;
        }
        PasswordCommand::Change => {
            let current = passwords.password("Current password: ")?;
            let new_password = passwords.password("New password: ")?;
            let result = gateway
                .change_current_user_password(&current, &new_password)
                .await;
            finish_silently(gateway, result, "Change password", "Could not change the password.")?;
            writeln!(out, "Password changed")?;
        }
    }
    Ok(())
}

/// Restores the stored session, failing when the user has to log in.
async fn require_session(gateway: &SessionGateway) -> AppResult<Session> {
    match gateway.session_status(false).await? {
        SessionStatus::Valid(session) => Ok(session),
        SessionStatus::NotConfigured => Err(AppError::Config(
            "no server connection configured, run `chatadmin connect <URL>` first".to_string(),
        )),
        SessionStatus::Invalid(reason) => Err(AppError::Auth(format!(
            "{reason}, run `chatadmin login <USERNAME>`"
        ))),
    }
}

/// Prints the payload of a successful envelope, reports anything else.
fn finish<T: Serialize>(
    gateway: &SessionGateway,
    result: GatewayResult<ApiResponse<T>>,
    title: &str,
    fallback: &str,
    out: &mut dyn Write,
) -> AppResult<()> {
    match finish_silently(gateway, result, title, fallback)? {
        Some(data) => print_json(out, &data),
        None => {
            writeln!(out, "OK")?;
            Ok(())
        }
    }
}

/// Like [`finish`] but hands the payload back instead of printing it.
fn finish_silently<T>(
    gateway: &SessionGateway,
    result: GatewayResult<ApiResponse<T>>,
    title: &str,
    fallback: &str,
) -> AppResult<Option<T>> {
    match result {
        Ok(response) if response.success => Ok(response.data),
        Ok(response) => Err(reject(gateway, response.error, title, fallback)),
        Err(e) => {
            gateway.report_error(&e, title, fallback);
            Err(e.into())
        }
    }
}

/// Shows a failure envelope and turns it into an error.
fn reject(
    gateway: &SessionGateway,
    error: Option<ErrorItem>,
    title: &str,
    fallback: &str,
) -> AppError {
    let item = error.unwrap_or_default();
    gateway.report_typed_error(&item, title, fallback);
    AppError::Rejected(chatadmin_client::alerts::compose_error_message(&item, fallback))
}

fn resolve_paging(paging: PageArgs, config: &AppConfig) -> (u32, u32) {
    (paging.page, paging.size.unwrap_or_else(|| config.page_size()))
}

fn describe_roles(roles: &[Role]) -> String {
    if roles.is_empty() {
        return "no roles".to_string();
    }
    roles
        .iter()
        .map(|r| r.role.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Serialize)]
struct SessionSummary<'a> {
    roles: Vec<&'a str>,
    super_admin: bool,
    business_admin: bool,
    profile: &'a serde_json::Map<String, serde_json::Value>,
}

fn session_summary(session: &Session) -> SessionSummary<'_> {
    SessionSummary {
        roles: session.roles.iter().map(|r| r.role.as_str()).collect(),
        super_admin: session.is_super_admin(),
        business_admin: session.is_business_admin(),
        profile: &session.profile,
    }
}

fn print_json<T: Serialize>(out: &mut dyn Write, value: &T) -> AppResult<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatadmin_client::alerts::LogAlertPresenter;
    use claims::*;
    use chatadmin_client::config::GatewaySettings;
    use chatadmin_client::storage::{KeyValueStore, MemoryStore};
    use std::sync::Arc;

    struct NoPasswords;

    impl PasswordSource for NoPasswords {
        fn password(&self, _prompt: &str) -> AppResult<String> {
            Err(AppError::Io("no terminal".to_string()))
        }
    }

    fn gateway(store: Arc<MemoryStore>) -> SessionGateway {
        SessionGateway::new(&GatewaySettings::default(), store, Arc::new(LogAlertPresenter))
            .unwrap()
    }

    async fn run_to_string(command: Command, gateway: &SessionGateway) -> (AppResult<()>, String) {
        let mut out = Vec::new();
        let result = run(command, &AppConfig::default(), gateway, &NoPasswords, &mut out).await;
        (result, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn connect_prints_normalized_url() {
        let store = Arc::new(MemoryStore::new());
        let gateway = gateway(store.clone());

        let (result, output) = run_to_string(
            Command::Connect {
                url: "http://x.test\\".to_string(),
            },
            &gateway,
        )
        .await;

        assert_ok!(result);
        assert_eq!(output, "Connected to http://x.test/\n");
        assert!(store.get("conn").unwrap().is_some());
    }

    #[tokio::test]
    async fn status_without_connection() {
        let gateway = gateway(Arc::new(MemoryStore::new()));
        let (result, output) = run_to_string(Command::Status { force: false }, &gateway).await;
        assert_ok!(result);
        assert_eq!(output, "No server connection configured\n");
    }

    #[tokio::test]
    async fn whoami_uses_stored_session() {
        let store = Arc::new(MemoryStore::new());
        store
            .set("conn", r#"{"ServerUrl":"http://x.test/"}"#)
            .unwrap();
        store
            .set(
                "user",
                r#"{"accessToken":"t","roles":[{"role":"SUPER_ADMIN"}],"username":"root"}"#,
            )
            .unwrap();
        let gateway = gateway(store);

        let (result, output) = run_to_string(Command::Whoami, &gateway).await;
        assert_ok!(result);
        let summary: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(summary["super_admin"], true);
        assert_eq!(summary["profile"]["username"], "root");
    }

    #[tokio::test]
    async fn protected_commands_require_login() {
        let store = Arc::new(MemoryStore::new());
        store
            .set("conn", r#"{"ServerUrl":"http://x.test/"}"#)
            .unwrap();
        let gateway = gateway(store);

        let (result, output) = run_to_string(Command::Roles, &gateway).await;
        assert_matches!(result, Err(AppError::Auth(_)));
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn login_without_password_source_fails_before_any_call() {
        let gateway = gateway(Arc::new(MemoryStore::new()));
        let (result, _) = run_to_string(
            Command::Login {
                username: "u".to_string(),
                password: None,
            },
            &gateway,
        )
        .await;
        assert_eq!(assert_err!(result), AppError::Io("no terminal".to_string()));
    }

    #[test]
    fn roles_are_listed_in_order() {
        let roles = vec![Role::new("AGENT"), Role::new("BUSINESS_ADMIN")];
        assert_eq!(describe_roles(&roles), "AGENT, BUSINESS_ADMIN");
        assert_eq!(describe_roles(&[]), "no roles");
    }
}
