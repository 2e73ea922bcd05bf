// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! ticraster command line entry point
//!
//! Renders JSON scene files to PNG and writes the default configuration.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ticraster::core::config::GfxConfig;
use ticraster::core::scene::Scene;
use ticraster::core::screenshot;
use ticraster::Gfx;

#[derive(Parser)]
#[command(name = "ticraster", version, about = "Indexed-color fantasy console rasterizer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a scene file to PNG
    Render {
        /// Scene description (JSON)
        scene: PathBuf,

        /// Output PNG path
        #[arg(short, long, default_value = "screen.png")]
        output: PathBuf,

        /// Renderer configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Upscaling factor, overrides the configuration
        #[arg(short, long)]
        scale: Option<u32>,
    },

    /// Write the default configuration
    DefaultConfig {
        #[arg(short, long, default_value = "ticraster.toml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG may come from a .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Render {
            scene,
            output,
            config,
            scale,
        } => {
            let config = match config {
                Some(path) => GfxConfig::load(path)?,
                None => GfxConfig::default(),
            };

            let mut gfx = Gfx::with_config(&config)?;
            gfx.reset();

            let scene = Scene::load(&scene)?;
            scene.apply(&mut gfx)?;

            let scale = scale.unwrap_or(config.screenshot_scale);
            screenshot::write_png(gfx.ram(), &output, scale)?;
        }
        Command::DefaultConfig { output } => {
            GfxConfig::default().save(&output)?;
            log::info!("Wrote default config to {}", output.display());
        }
    }

    Ok(())
}
