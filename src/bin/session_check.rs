use teamup::api::{self, ApiClient};
use teamup::config::TeamUpConfig;
use teamup::core::application::ApplicationStatus;
use teamup::core::membership::MembershipStatus;
use teamup::session::{self, keyring};

#[tokio::main]
async fn main() {
    if let Ok(journal) = systemd_journal_logger::JournalLog::new() {
        if let Err(e) = journal
            .with_syslog_identifier("teamup-session-check".to_string())
            .install()
        {
            eprintln!("journal logging unavailable: {}", e);
        }
    }
    log::set_max_level(log::LevelFilter::Info);

    let config = match TeamUpConfig::load() {
        Ok((config, _)) => config,
        Err(e) => {
            println!("Config error: {:?}", e);
            return;
        }
    };
    let server = config.base_url();

    println!("=== TeamUp session check ===\n");
    println!("Server: {}", server);

    let stored = match keyring::load(&server).await {
        Ok(s) if s.is_authenticated() => s,
        Ok(_) => {
            println!("  No stored session. Sign in from the app first.");
            return;
        }
        Err(e) => {
            println!("  Keyring error: {}", e);
            return;
        }
    };

    let client = match ApiClient::new(&server) {
        Ok(c) => c,
        Err(e) => {
            println!("  Client error: {}", e);
            return;
        }
    };

    let session = match session::resume(&client, stored).await {
        Ok(s) => s,
        Err(e) => {
            println!("  Session rejected: {}", e);
            return;
        }
    };

    let Some(user) = session.user() else {
        println!("  Session has no user profile");
        return;
    };
    println!(
        "Signed in as {} <{}> ({}), skills: {}\n",
        user.name,
        user.email,
        user.role.label(),
        if user.skills.is_empty() {
            "none".to_string()
        } else {
            user.skills.join(", ")
        }
    );

    match api::projects::list(&client).await {
        Ok(items) => {
            let own = items.iter().filter(|p| p.created_by == user.id).count();
            println!("  Projects:     {} ({} created by you)", items.len(), own);
        }
        Err(e) => println!("  Projects:     error: {}", e),
    }

    match api::hackathons::list(&client).await {
        Ok(items) => {
            let own = items.iter().filter(|h| h.created_by == user.id).count();
            println!("  Hackathons:   {} ({} created by you)", items.len(), own);
        }
        Err(e) => println!("  Hackathons:   error: {}", e),
    }

    match api::applications::list_mine(&client).await {
        Ok(items) => {
            let count = |s: ApplicationStatus| items.iter().filter(|a| a.status == s).count();
            println!(
                "  Applications: {} ({} pending, {} approved, {} rejected)",
                items.len(),
                count(ApplicationStatus::Pending),
                count(ApplicationStatus::Approved),
                count(ApplicationStatus::Rejected)
            );
        }
        Err(e) => println!("  Applications: error: {}", e),
    }

    match api::memberships::for_user(&client, user.id).await {
        Ok(items) => {
            let count = |s: MembershipStatus| items.iter().filter(|m| m.status == s).count();
            println!(
                "  Memberships:  {} ({} active, {} invited)",
                items.len(),
                count(MembershipStatus::Active),
                count(MembershipStatus::Invited)
            );
        }
        Err(e) => println!("  Memberships:  error: {}", e),
    }

    match api::notifications::list(&client).await {
        Ok(items) => {
            let unread = items.iter().filter(|n| !n.is_read).count();
            println!("  Notifications: {} ({} unread)", items.len(), unread);
        }
        Err(e) => println!("  Notifications: error: {}", e),
    }
}
