use super::*;

#[test]
fn no_command_is_none_and_defaults_to_seed() {
    let cli = Cli::try_parse_from(["shopseed"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
    assert!(matches!(
        cli.command.unwrap_or_default(),
        Commands::Seed {
            dry_run: false,
            skip_admin: false,
            skip_catalog: false
        }
    ));
}

#[test]
fn parses_seed_flags() {
    let cli = Cli::try_parse_from(["shopseed", "seed", "--dry-run", "--skip-admin"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Seed {
            dry_run: true,
            skip_admin: true,
            skip_catalog: false
        })
    ));
}

#[test]
fn parses_skip_catalog() {
    let cli = Cli::try_parse_from(["shopseed", "seed", "--skip-catalog"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Seed {
            skip_catalog: true,
            ..
        })
    ));
}

#[test]
fn parses_inventory_and_report() {
    let cli = Cli::try_parse_from(["shopseed", "inventory"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Inventory)));

    let cli = Cli::try_parse_from(["shopseed", "report"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Report)));
}

#[test]
fn parses_db_migrate_command() {
    let cli = Cli::try_parse_from(["shopseed", "db", "migrate"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Migrate
        })
    ));
}

#[test]
fn parses_db_ping_command() {
    let cli = Cli::try_parse_from(["shopseed", "db", "ping"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Ping
        })
    ));
}

#[test]
fn rejects_unknown_flag() {
    assert!(Cli::try_parse_from(["shopseed", "seed", "--force"]).is_err());
}

#[test]
fn db_requires_a_subcommand() {
    assert!(Cli::try_parse_from(["shopseed", "db"]).is_err());
}
