use bac_core::*;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "litrbol")]
#[command(about = "Personal BAC and consumption tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current BAC estimate and session drinks (default)
    Status,

    /// Record a drink
    Add {
        /// Use a named preset (beer, wine, vodka)
        #[arg(long, conflicts_with_all = ["amount", "percentage"])]
        preset: Option<String>,

        /// Volume in milliliters
        #[arg(long)]
        amount: Option<String>,

        /// Alcohol by volume in percent
        #[arg(long)]
        percentage: Option<String>,

        /// Drink time, e.g. "2026-08-05 20:15" (local; defaults to now)
        #[arg(long)]
        at: Option<String>,
    },

    /// Delete a recorded drink by id
    Remove {
        id: i64,
    },

    /// Show the full history grouped by day
    History,

    /// Show lifetime statistics and rank
    Stats,

    /// Show or edit the profile
    Profile {
        /// male or female
        #[arg(long)]
        gender: Option<String>,

        /// Weight in kilograms
        #[arg(long)]
        weight: Option<String>,

        /// Height in centimeters
        #[arg(long)]
        height: Option<String>,
    },

    /// List the built-in drink presets
    Presets,
}

fn main() -> Result<()> {
    // Initialize logging
    bac_core::logging::init();

    let cli = Cli::parse();

    // Determine data directory
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());

    let catalog = get_default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    let mut tracker = Tracker::open(JsonFileStore::new(&data_dir));
    let now = Utc::now();

    match cli.command {
        Some(Commands::Status) | None => cmd_status(&tracker, &config, now),
        Some(Commands::Add {
            preset,
            amount,
            percentage,
            at,
        }) => cmd_add(&mut tracker, catalog, preset, amount, percentage, at, now),
        Some(Commands::Remove { id }) => cmd_remove(&mut tracker, id),
        Some(Commands::History) => cmd_history(&tracker),
        Some(Commands::Stats) => cmd_stats(&tracker, catalog, &config),
        Some(Commands::Profile {
            gender,
            weight,
            height,
        }) => cmd_profile(&mut tracker, gender, weight, height),
        Some(Commands::Presets) => cmd_presets(catalog),
    }
}

fn cmd_status(tracker: &Tracker<JsonFileStore>, config: &Config, now: DateTime<Utc>) -> Result<()> {
    let mut session = select_session(tracker.drinks(), now, config.session.window_hours);
    let bac = estimate_bac(&session, tracker.profile(), now, &config.model);
    let level = IntoxicationLevel::from_bac(bac);

    display_header("CURRENT BAC");
    println!("  {:.2}‰ — {}", bac, level.label());
    println!(
        "  Drinks in the last {} hours: {}",
        config.session.window_hours,
        session.len()
    );
    println!();

    if session.is_empty() {
        println!("  No drinks in the current session.");
    } else {
        session.sort_by(|a, b| b.datetime.cmp(&a.datetime));
        for drink in &session {
            println!(
                "  → [{}] {} mL • {}%  ({})",
                drink.id,
                drink.amount_ml,
                drink.percentage,
                format_relative_label(drink.datetime, now)
            );
        }
    }
    println!();

    Ok(())
}

fn cmd_add(
    tracker: &mut Tracker<JsonFileStore>,
    catalog: &Catalog,
    preset: Option<String>,
    amount: Option<String>,
    percentage: Option<String>,
    at: Option<String>,
    now: DateTime<Utc>,
) -> Result<()> {
    let datetime = at.map(|s| parse_datetime(&s, now)).unwrap_or(now);

    let id = match preset {
        Some(name) => tracker.apply_preset(catalog, &name, datetime, now)?,
        None => {
            let amount_ml = amount.as_deref().map(parse_number).unwrap_or(0.0);
            let percentage = percentage.as_deref().map(parse_number).unwrap_or(0.0);
            tracker.add_drink(amount_ml, percentage, datetime, now)
        }
    };

    println!("✓ Drink logged! (id {})", id);
    Ok(())
}

fn cmd_remove(tracker: &mut Tracker<JsonFileStore>, id: i64) -> Result<()> {
    if tracker.remove_drink(id) {
        println!("✓ Drink {} removed.", id);
    } else {
        println!("No drink with id {}.", id);
    }
    Ok(())
}

fn cmd_history(tracker: &Tracker<JsonFileStore>) -> Result<()> {
    display_header("HISTORY");

    let groups = group_by_day(tracker.drinks());
    if groups.is_empty() {
        println!("  History is empty. Log your first drink!");
        println!();
        return Ok(());
    }

    for group in &groups {
        println!("  {}", group.label);
        for drink in &group.drinks {
            println!(
                "    [{}] {} mL • {}%  at {}",
                drink.id,
                drink.amount_ml,
                drink.percentage,
                drink.datetime.with_timezone(&Local).format("%H:%M")
            );
        }
        println!();
    }

    Ok(())
}

fn cmd_stats(tracker: &Tracker<JsonFileStore>, catalog: &Catalog, config: &Config) -> Result<()> {
    let total = total_alcohol_ml(tracker.drinks());
    let rank = resolve_rank(total, &catalog.tiers);
    let equivalents = container_equivalents(total, &config.containers);

    display_header("LIFETIME STATS");
    println!("  {}  {}", rank.icon, rank.name);
    println!("  {:.2} liters of pure alcohol", total / 1000.0);
    println!("  Drinks recorded: {}", tracker.drinks().len());
    println!();
    println!("  ≈ {} bottles of beer (0.5 L)", equivalents.beer_bottles);
    println!("  ≈ {} bottles of vodka (0.5 L)", equivalents.vodka_bottles);
    println!();

    Ok(())
}

fn cmd_profile(
    tracker: &mut Tracker<JsonFileStore>,
    gender: Option<String>,
    weight: Option<String>,
    height: Option<String>,
) -> Result<()> {
    let update = ProfileUpdate {
        gender: gender.as_deref().and_then(parse_gender),
        weight_kg: weight.as_deref().map(parse_number),
        height_cm: height.as_deref().map(parse_number),
    };

    let edited =
        update.gender.is_some() || update.weight_kg.is_some() || update.height_cm.is_some();
    if edited {
        tracker.set_profile(update);
        println!("✓ Profile updated.");
        println!();
    }

    let profile = tracker.profile();
    display_header("PROFILE");
    println!(
        "  Gender: {}",
        match profile.gender {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    );
    println!("  Weight: {} kg", profile.weight_kg);
    println!("  Height: {} cm", profile.height_cm);
    println!();

    Ok(())
}

fn cmd_presets(catalog: &Catalog) -> Result<()> {
    display_header("PRESETS");
    for preset in &catalog.presets {
        println!(
            "  {:8} {} mL • {}%",
            preset.name, preset.amount_ml, preset.percentage
        );
    }
    println!();
    Ok(())
}

fn display_header(title: &str) {
    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│  {}", title);
    println!("╰─────────────────────────────────────────╯");
    println!();
}

/// Lenient numeric parsing: unparsable input becomes 0.0
fn parse_number(input: &str) -> f64 {
    input.trim().parse().unwrap_or(0.0)
}

fn parse_gender(input: &str) -> Option<Gender> {
    match input.to_lowercase().as_str() {
        "male" | "m" => Some(Gender::Male),
        "female" | "f" => Some(Gender::Female),
        other => {
            eprintln!("Unknown gender: {}. Keeping current value.", other);
            None
        }
    }
}

/// Parse a user-supplied drink time in local wall-clock form
///
/// Accepts "YYYY-MM-DD HH:MM[:SS]" and the T-separated variant, or a full
/// RFC 3339 timestamp. Unparseable input falls back to `now`.
fn parse_datetime(input: &str, now: DateTime<Utc>) -> DateTime<Utc> {
    let trimmed = input.trim();

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            if let Some(local) = Local.from_local_datetime(&naive).earliest() {
                return local.with_timezone(&Utc);
            }
        }
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return parsed.with_timezone(&Utc);
    }

    eprintln!("Could not parse time '{}'. Using the current time.", input);
    now
}
