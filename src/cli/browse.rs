//! Directory listings: coaches, gyms and clients

use crate::api::{ClientSummary, CoachSummary, GymSummary};
use crate::cli::connect;
use crate::config::Config;
use crate::error::Result;
use crate::workspace::RosterStats;
use clap::Args;
use serde::Serialize;

/// Listing command arguments
#[derive(Args)]
pub struct BrowseArgs {
    /// Print raw JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the coaches command
pub async fn coaches(args: BrowseArgs) -> Result<()> {
    let config = Config::load()?;
    let coaches = connect(&config)?.get_coaches().await?;

    if args.json {
        return print_json(&coaches);
    }
    print!("{}", render_coaches(&coaches));
    Ok(())
}

/// Run the gyms command
pub async fn gyms(args: BrowseArgs) -> Result<()> {
    let config = Config::load()?;
    let gyms = connect(&config)?.get_gyms().await?;

    if args.json {
        return print_json(&gyms);
    }
    print!("{}", render_gyms(&gyms));
    Ok(())
}

/// Run the clients command
pub async fn clients(args: BrowseArgs) -> Result<()> {
    let config = Config::load()?;
    let clients = connect(&config)?.get_clients().await?;

    if args.json {
        return print_json(&clients);
    }
    print!("{}", render_clients(&clients));
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn render_coaches(coaches: &[CoachSummary]) -> String {
    let stats = RosterStats::from(coaches);
    let mut output = format!(
        "Roster: {} coaches, {} specializations\n\n",
        stats.roster_size, stats.unique_specializations
    );

    if coaches.is_empty() {
        output.push_str("No coaches yet.\n");
    }
    for coach in coaches {
        output.push_str(&format!("  #{:<4} {} ({})\n", coach.id, coach.name, coach.specialization));
    }
    output
}

fn render_gyms(gyms: &[GymSummary]) -> String {
    if gyms.is_empty() {
        return "No gyms yet.\n".to_string();
    }
    gyms.iter()
        .map(|gym| format!("  #{:<4} {} - {}\n", gym.id, gym.name, gym.location))
        .collect()
}

fn render_clients(clients: &[ClientSummary]) -> String {
    if clients.is_empty() {
        return "No clients yet.\n".to_string();
    }
    clients
        .iter()
        .map(|client| match &client.email {
            Some(email) => format!("  #{:<4} {} <{}>\n", client.id, client.name, email),
            None => format!("  #{:<4} {}\n", client.id, client.name),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_coaches_with_stats() {
        let coaches = vec![
            CoachSummary { id: 1, name: "Sara".into(), specialization: "Yoga".into() },
            CoachSummary { id: 2, name: "Omar".into(), specialization: "Yoga".into() },
        ];
        let output = render_coaches(&coaches);

        assert!(output.starts_with("Roster: 2 coaches, 1 specializations"));
        assert!(output.contains("#1    Sara (Yoga)"));
    }

    #[test]
    fn test_render_empty_lists() {
        assert!(render_coaches(&[]).contains("No coaches yet."));
        assert_eq!(render_gyms(&[]), "No gyms yet.\n");
        assert_eq!(render_clients(&[]), "No clients yet.\n");
    }

    #[test]
    fn test_render_clients_with_optional_email() {
        let clients = vec![
            ClientSummary { id: 3, name: "Lina".into(), email: Some("lina@example.com".into()) },
            ClientSummary { id: 4, name: "Ali".into(), email: None },
        ];
        let output = render_clients(&clients);

        assert!(output.contains("Lina <lina@example.com>"));
        assert!(output.contains("#4    Ali\n"));
    }
}
