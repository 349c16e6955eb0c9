use clap::{Parser, ValueEnum};
use sapper_core::{BoardConfig, CellCount};
use wasm_bindgen::prelude::*;

mod board;
mod canvas;
mod sound;
mod utils;

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum Preset {
    /// 20x16 board
    General,
    /// 6x5 board
    Demo,
}

impl Preset {
    fn config(self) -> BoardConfig {
        match self {
            Self::General => BoardConfig::GENERAL,
            Self::Demo => BoardConfig::DEMO,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<String>,

    /// Board to play on
    #[arg(short, long, value_enum, default_value_t = Preset::General)]
    preset: Preset,

    /// Override the number of mines of the preset
    #[arg(short, long)]
    mines: Option<CellCount>,
}

impl Args {
    fn board_config(&self) -> BoardConfig {
        let preset = self.preset.config();
        let Some(mines) = self.mines else {
            return preset;
        };

        BoardConfig::new(preset.size, mines).unwrap_or_else(|err| {
            log::warn!("Ignoring mine count {}: {}", mines, err);
            preset
        })
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::try_parse_from(location_hash.split(['#', '&'])).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }

    let props = board::BoardProps {
        config: args.board_config(),
        seed: args.seed.as_deref().map(utils::seed_from_str),
    };
    log::debug!("board: {:?}", props);

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    log::debug!("App started");
    yew::Renderer::<board::BoardView>::with_root_and_props(root, props).render();
}
