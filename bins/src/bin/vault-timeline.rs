// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! The vault-timeline command line tool
//!
//! Runs one render pass over a JSON fixture (the cards of a timeline and the
//! measured layout of each rendered card) and prints the formatted dates and
//! the range bars.
//!

use clap::{CommandFactory, Parser, ValueEnum, builder::PossibleValue};
use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, TermLogger, TerminalMode,
};
use std::path::{Path, PathBuf};
use vault_timeline_core::{
    CardContent, EndDate, FormatError, TimelineSettings, format_abstract_date,
    presets::{self, ALL_PRESETS},
    sort_cards,
};
use vault_timeline_renderer::{CardLayout, Engine, RangeLayoutParams, RangeOut};

#[macro_use]
extern crate log;
extern crate simplelog;

/// vault-timeline entry point
///
/// One of:
/// - Render a timeline fixture
/// - List the date presets
/// - Print the effective settings
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    // Setup logging
    let config_log = ConfigBuilder::new()
        .add_filter_allow_str("vault_timeline")
        .build();

    CombinedLogger::init(vec![TermLogger::new(
        if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        },
        config_log,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )])?;

    match (&args.cli_command, &args.input) {
        //----------------------------------------------------------------------
        // Valid
        //----------------------------------------------------------------------
        (Command::Render, Some(input)) => {
            let settings = load_settings(&args)?;
            render(input, &settings, args.json)?;
        }
        (Command::Presets, _) => {
            for preset in ALL_PRESETS {
                println!("{} ({})", preset.name, preset.icon);
            }
        }
        (Command::Settings, _) => {
            println!("{}", load_settings(&args)?.to_json()?);
        }
        //----------------------------------------------------------------------
        // Invalid
        //----------------------------------------------------------------------
        _ => {
            eprintln!("CLI Error: invalid options");
            Cli::command().print_long_help()?;
            std::process::exit(1);
        }
    }

    Ok(())
}

/// A render pass: the cards to draw and where the host drew them
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderPass {
    timeline_height: f64,

    #[serde(default)]
    range_layout: RangeLayoutParams,

    cards: Vec<CardContent>,

    /// Measured layout of each card, in display (sorted) order
    #[serde(default)]
    layouts: Vec<CardLayout>,
}

/// A card's dates as displayed
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FormattedCard {
    title: String,
    start_date: Option<String>,
    end_date: Option<String>,
}

#[derive(Debug, Serialize)]
struct RenderOutput {
    cards: Vec<FormattedCard>,
    ranges: Vec<RangeOut>,
}

/// Load the settings file if one is given, otherwise use a preset
fn load_settings(args: &Cli) -> Result<TimelineSettings, Box<dyn std::error::Error>> {
    let settings = match &args.settings {
        Some(path) => TimelineSettings::from_json(&std::fs::read_to_string(path)?)?,
        None => presets::preset_by_name(&args.preset)?,
    };
    Ok(settings)
}

fn render(
    input: &Path,
    settings: &TimelineSettings,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut pass: RenderPass = serde_json::from_str(&std::fs::read_to_string(input)?)?;
    info!("rendering {} cards from {}", pass.cards.len(), input.display());

    sort_cards(&mut pass.cards)?;
    if pass.layouts.len() != pass.cards.len() {
        warn!(
            "{} layouts for {} cards, unmeasured cards get no range",
            pass.layouts.len(),
            pass.cards.len()
        );
    }

    let cards = pass
        .cards
        .iter()
        .map(|card| format_card(card, settings))
        .collect::<Result<Vec<_>, _>>()?;

    let engine = Engine::new(pass.range_layout);
    let ranges = engine.ranges_for_drawing(&pass.cards, &pass.layouts, pass.timeline_height)?;

    if json {
        let output = RenderOutput { cards, ranges };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for (card, formatted) in pass.cards.iter().zip(&cards) {
        let start = formatted.start_date.as_deref().unwrap_or("?");
        let ongoing = card.end_date.as_ref().is_some_and(EndDate::is_now);
        match &formatted.end_date {
            Some(end) if ongoing => println!("{start} - {end} (ongoing)  {}", card.title),
            Some(end) => println!("{start} - {end}  {}", card.title),
            None => println!("{start}  {}", card.title),
        }
    }
    println!();
    for range in &ranges {
        println!(
            "{:<24} top {:>8.1}px  height {:>8.1}px  lane {} ({}, {:.0}px)",
            pass.cards[range.card_index].title,
            range.top_px,
            range.height_px,
            range.lane,
            range.colour.css_variable(),
            range.left_px,
        );
    }

    Ok(())
}

fn format_card(card: &CardContent, settings: &TimelineSettings) -> Result<FormattedCard, FormatError> {
    Ok(FormattedCard {
        title: card.title.clone(),
        start_date: card
            .start_date
            .as_ref()
            .map(|date| format_abstract_date(date.as_point(), settings))
            .transpose()?,
        end_date: card
            .end_date
            .as_ref()
            .map(|date| format_abstract_date(date.as_point(), settings))
            .transpose()?,
    })
}

/// vault-timeline CLI args using [clap]
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Format the dates and lay out the ranges of a timeline",
    after_help = "The input is a JSON render pass: \
        { \"timelineHeight\": 1000, \"cards\": [...], \"layouts\": [{ \"topPx\": 0, \"heightPx\": 80 }] }"
)]
pub struct Cli {
    #[arg(value_enum)]
    pub cli_command: Command,

    /// Path to the render pass JSON
    pub input: Option<PathBuf>,

    /// Path to a settings JSON file (overrides `--preset`)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Date preset to use when no settings file is given
    #[arg(long, default_value = "normal")]
    pub preset: String,

    /// Print the output as JSON
    #[arg(long)]
    pub json: bool,

    /// Log debug information
    #[arg(long, short)]
    pub verbose: bool,
}

#[derive(Debug, Clone)]
pub enum Command {
    Render,
    Presets,
    Settings,
}

impl ValueEnum for Command {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Render, Self::Presets, Self::Settings]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Command::Render => Some(
                PossibleValue::new("render").help("Format and lay out the render pass at path"),
            ),
            Command::Presets => {
                Some(PossibleValue::new("presets").help("List the built-in date presets"))
            }
            Command::Settings => Some(
                PossibleValue::new("settings").help("Print the settings that would be used"),
            ),
        }
    }
}
