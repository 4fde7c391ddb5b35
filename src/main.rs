use anyhow::{Context, bail};

use sumak::account::Role;
use sumak::auth::AccountService;
use sumak::dashboard::EntrepreneurDashboard;
use sumak::store::AccountStore;
use sumak::wizard::{
    FormSnapshot, RegistrationWizard, RoleSection, StepMarker, StepTransition, ValidationErrors,
    WizardRenderer, WizardStep,
};

const USAGE: &str = "usage: sumak <command>

commands:
  register <form.json>        walk the registration wizard with a saved form
  login <email> <password>    log in and print the session
  recover <email>             issue a password recovery code
  reset <email> <code> <new>  set a new password with a recovery code
  tasks <email>               show an entrepreneur's task path
  complete <email> <task-id>  mark a task as completed
  accounts                    list registered accounts";

/// Prints wizard output to stderr.
struct ConsoleRenderer;

impl WizardRenderer for ConsoleRenderer {
    fn show_errors(&mut self, errors: &ValidationErrors) {
        for e in errors.iter() {
            eprintln!("   ✗ {}: {}", e.key, e.message);
        }
    }

    fn clear_errors(&mut self) {}

    fn show_role_section(&mut self, section: &RoleSection) {
        let required: Vec<&str> = section
            .required
            .fields
            .iter()
            .map(|f| f.name())
            .chain(section.required.groups.iter().map(|g| g.name()))
            .collect();
        eprintln!("   Role: {} (requires {})", section.role, required.join(", "));
    }

    fn show_step(&mut self, transition: &StepTransition) {
        let bar: String = transition
            .markers
            .iter()
            .map(|(_, m)| match m {
                StepMarker::Completed => '●',
                StepMarker::Active => '◉',
                StepMarker::Unmarked => '○',
            })
            .collect();
        eprintln!("   Step {} {}", transition.active, bar);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let service = AccountService::from_env()
        .await
        .context("opening the account store")?;
    let store = service.store();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["register", path] => register(&service, path).await,
        ["login", email, password] => {
            let session = service.login(email, password, false).await?;
            println!("{}", serde_json::to_string_pretty(&session)?);
            eprintln!("   → {}", session.dashboard_route());
            Ok(())
        }
        ["recover", email] => {
            let code = service.request_recovery(email).await?;
            eprintln!("   Code sent to {}", code.sent_to);
            println!("{}", serde_json::to_string_pretty(&code)?);
            Ok(())
        }
        ["reset", email, code, password] => {
            let code: u32 = code.parse().context("recovery code must be a number")?;
            service.reset_credential(email, code, password).await?;
            eprintln!("   ✓ Password updated for {email}");
            Ok(())
        }
        ["tasks", email] => {
            let account = find(store.as_ref(), email).await?;
            let Some(dashboard) = EntrepreneurDashboard::for_account(&account) else {
                bail!("{email} is a {} account and has no tasks", account.role());
            };
            println!("{}", serde_json::to_string_pretty(&dashboard)?);
            Ok(())
        }
        ["complete", email, task_id] => {
            let task_id: u32 = task_id.parse().context("task id must be a number")?;
            let account = find(store.as_ref(), email).await?;
            let task = service.complete_task(account.id, task_id).await?;
            eprintln!("   ✓ {}", task.title);
            Ok(())
        }
        ["accounts"] => {
            for account in store.list_all().await? {
                println!("{}\t{}\t{}", account.id, account.role(), account.email);
            }
            Ok(())
        }
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    }
}

async fn find(store: &dyn AccountStore, email: &str) -> anyhow::Result<sumak::account::Account> {
    store
        .find_by_email(email)
        .await?
        .with_context(|| format!("no account with email {email}"))
}

/// Replay a saved form through the wizard, then create the account.
async fn register(service: &AccountService, path: &str) -> anyhow::Result<()> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {path}"))?;
    let mut form: FormSnapshot =
        serde_json::from_str(&raw).with_context(|| format!("parsing {path}"))?;

    let mut wizard = RegistrationWizard::new(ConsoleRenderer);
    if let Some(role) = form.role() {
        wizard.select_role(&mut form, role);
    }

    for target in &WizardStep::ALL[1..] {
        if !wizard.next(*target, &form) {
            bail!("form is incomplete at step {}", wizard.current_step());
        }
    }
    wizard.submit(&form)?;

    let account = service.register(&form).await?;
    println!("{}", serde_json::to_string_pretty(&account)?);
    if account.role() == Role::Entrepreneur {
        let count = account
            .entrepreneur()
            .map_or(0, |p| p.personalized_path.len());
        eprintln!("   {count} tasks in your path");
    }
    eprintln!("   → {}", account.role().dashboard_route());
    Ok(())
}
