use ptcgp_odds_core::{
    calculate_with, draw_count, percent, simulate_draws, CalculationDetails, CalculationInput,
    CalculationResult, CardCatalog, FieldError, RawForm, SimulationConfig, SimulationReport,
};
use ptcgp_odds_data::load_catalog;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
usage: ptcgp-odds [options]

  --card NAME              card to evaluate (default: first catalog card)
  --deck N                 cards left in deck
  --hand N                 cards in hand
  --target R[:H]           tracked card with R copies in deck and H in hand;
                           repeat for up to 3 cards (default: 1:0)
  --opponent-points N      opponent points already earned (default: 1)
  --user-points N          your points already earned (default: 1)
  --json                   print the result as JSON
  --list                   list the cards in the catalog
  --simulate TRIALS        cross-check with seeded shuffled draws
  --seed N                 seed for --simulate
  --assets DIR             directory holding cards.json (default: assets)
  -h, --help               show this help";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CliOptions {
    card: Option<String>,
    deck: Option<String>,
    hand: Option<String>,
    targets: Vec<String>,
    opponent_points: Option<String>,
    user_points: Option<String>,
    json: bool,
    list: bool,
    simulate: Option<u32>,
    seed: Option<u64>,
    assets: Option<PathBuf>,
    help: bool,
}

fn parse_cli_options(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut idx = 0usize;
    while idx < args.len() {
        let flag = args[idx].as_str();
        let mut value = || {
            idx += 1;
            args.get(idx)
                .cloned()
                .ok_or_else(|| format!("missing value for {flag}"))
        };
        match flag {
            "--card" => options.card = Some(value()?),
            "--deck" => options.deck = Some(value()?),
            "--hand" => options.hand = Some(value()?),
            "--target" => options.targets.push(value()?),
            "--opponent-points" => options.opponent_points = Some(value()?),
            "--user-points" => options.user_points = Some(value()?),
            "--simulate" => {
                let raw = value()?;
                options.simulate = Some(
                    raw.parse::<u32>()
                        .map_err(|_| format!("invalid trial count: {raw}"))?,
                );
            }
            "--seed" => {
                let raw = value()?;
                options.seed = Some(raw.parse::<u64>().map_err(|_| format!("invalid seed: {raw}"))?);
            }
            "--assets" => options.assets = Some(PathBuf::from(value()?)),
            "--json" => options.json = true,
            "--list" => options.list = true,
            "-h" | "--help" => options.help = true,
            other => return Err(format!("unknown argument: {other}")),
        }
        idx += 1;
    }
    Ok(options)
}

/// Maps flags onto the same raw form the web page submits.
fn build_form(options: &CliOptions, catalog: &CardCatalog) -> RawForm {
    let mut remaining_in_deck = Vec::new();
    let mut in_hand = Vec::new();
    for target in &options.targets {
        let (remaining, held) = target.split_once(':').unwrap_or((target.as_str(), "0"));
        remaining_in_deck.push(remaining.to_string());
        in_hand.push(held.to_string());
    }
    let unique = options.targets.len().max(1);
    RawForm {
        card_name: options
            .card
            .clone()
            .or_else(|| catalog.names().first().map(|name| name.to_string()))
            .unwrap_or_default(),
        cards_in_deck: options.deck.clone().unwrap_or_default(),
        cards_in_hand: options.hand.clone().unwrap_or_default(),
        unique_cards_needed: unique.to_string(),
        remaining_in_deck,
        in_hand,
        opponent_points: options.opponent_points.clone(),
        user_points: options.user_points.clone(),
    }
}

fn main() {
    setup_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_cli_options(&args) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}\n\n{USAGE}");
            std::process::exit(2);
        }
    };
    if options.help {
        println!("{USAGE}");
        return;
    }
    if let Err(err) = run(&options) {
        error!("{err}");
        std::process::exit(1);
    }
}

fn setup_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already set");
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    result: &'a CalculationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    simulation: Option<&'a SimulationReport>,
}

fn run(options: &CliOptions) -> Result<(), String> {
    let assets = options
        .assets
        .clone()
        .unwrap_or_else(|| PathBuf::from("assets"));
    let catalog = load_catalog(&assets).map_err(|err| format!("{err:#}"))?;
    debug!(cards = catalog.len(), assets = %assets.display(), "catalog loaded");

    if options.list {
        for card in catalog.iter() {
            println!("{} [{}] - {}", card.name, card.policy.id(), card.effect_text);
        }
        return Ok(());
    }

    let form = build_form(options, &catalog);
    let input = form
        .parse()
        .map_err(|errors| format_field_errors(&errors))?;
    let result = calculate_with(&catalog, &input);
    let simulation = match options.simulate {
        Some(trials) => simulate(&catalog, &input, trials, options.seed)?,
        None => None,
    };

    if options.json {
        let output = JsonOutput {
            result: &result,
            simulation: simulation.as_ref(),
        };
        let body = serde_json::to_string_pretty(&output).map_err(|err| err.to_string())?;
        println!("{body}");
    } else {
        print!("{}", render_result(&result));
        if let Some(report) = &simulation {
            print!("{}", render_simulation(report));
        }
    }
    Ok(())
}

fn simulate(
    catalog: &CardCatalog,
    input: &CalculationInput,
    trials: u32,
    seed: Option<u64>,
) -> Result<Option<SimulationReport>, String> {
    let Ok(card) = catalog.lookup(&input.card_name) else {
        return Ok(None);
    };
    let Some(count) = draw_count(card, input) else {
        return Ok(None);
    };
    let mut config = SimulationConfig {
        trials,
        ..SimulationConfig::default()
    };
    if let Some(seed) = seed {
        config.seed = seed;
    }
    let copies: Vec<u32> = input
        .targets
        .iter()
        .map(|target| target.remaining_in_deck)
        .collect();
    simulate_draws(input.cards_in_deck, &copies, count, config)
        .map(Some)
        .map_err(|err| err.to_string())
}

fn format_field_errors(errors: &[FieldError]) -> String {
    let mut out = String::from("invalid input:");
    for err in errors {
        let _ = write!(out, "\n  {:?}: {}", err.field, err.message);
    }
    out
}

fn render_result(result: &CalculationResult) -> String {
    let mut out = String::new();
    let verdict = if result.worth_it {
        "Worth Playing"
    } else {
        "Not Worth Playing"
    };
    let _ = writeln!(out, "{verdict}");
    let _ = writeln!(out, "{}", result.explanation);
    let Some(details) = &result.details else {
        return out;
    };
    let _ = writeln!(out);
    let _ = writeln!(out, "Card: {}", details.card_name());
    let _ = writeln!(out, "Cards to Draw: {}", details.cards_to_draw());
    if let Some(combined) = details.combined_odds() {
        let _ = writeln!(out, "Total Odds: {}%", percent(combined));
    }
    match details {
        CalculationDetails::OpponentDrawByPoints(info) => {
            let _ = writeln!(out, "Points Needed: {}", info.points_needed);
            if info.has_cards_in_hand {
                let _ = writeln!(out, "Warning: Card(s) will be discarded from hand");
            }
            if let Some(threshold) = info.threshold_used {
                let _ = writeln!(out, "Threshold: {}%", percent(threshold));
            }
            if let Some(recommendation) = &info.recommendation {
                let _ = writeln!(out, "Recommendation: {recommendation}");
            }
        }
        CalculationDetails::AlwaysWorthwhile(info) => {
            let _ = writeln!(out, "Strategic Value: {}", info.strategic_value);
            let _ = writeln!(out, "Recommendation: {}", info.recommendation);
        }
        CalculationDetails::DrawToHandSize(_) => {}
    }
    let odds = details.odds();
    if !odds.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{:<6}{:<9}{:<9}{}", "Card", "In Hand", "In Deck", "Draw Chance");
        for row in odds {
            let note = if row.will_discard { " (will discard)" } else { "" };
            let _ = writeln!(
                out,
                "{:<6}{:<9}{:<9}{}%{}  {}",
                row.card_index,
                row.in_hand,
                row.remaining_in_deck,
                percent(row.probability),
                note,
                row.comment
            );
        }
    }
    out
}

fn render_simulation(report: &SimulationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Simulated {} draws of {} cards:",
        report.trials, report.draw_count
    );
    for (idx, frequency) in report.per_target.iter().enumerate() {
        let _ = writeln!(out, "  Card {}: {}%", idx + 1, percent(*frequency));
    }
    let _ = writeln!(out, "  All cards: {}%", percent(report.all_targets));
    out
}
