mod app;
mod color;
mod config;
mod data;
mod export;
mod frame;
mod state;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use app::AnimApp;
use clap::Parser;
use color::SeriesColors;
use config::AnimationConfig;
use data::model::TimeSeries;
use eframe::egui;

/// Animate u(x) and v(x) concentration profiles from simulation output.
#[derive(Parser, Debug)]
#[command(name = "diffusion-anim")]
#[command(about = "Animate concentration profiles from a time,position,u,v CSV file")]
struct Args {
    /// Data file (headerless CSV: time, position, u, v)
    data: PathBuf,

    /// Save the animation to <data>_anim.html after the window is closed
    #[arg(short, long)]
    save: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    run(&args, show_window)
}

/// Load the data, hand it to `show`, then export if `--save` was given.
///
/// The export still runs when `show` fails (no display available, for
/// instance); the display error is returned afterwards.
fn run<F>(args: &Args, show: F) -> Result<()>
where
    F: FnOnce(Arc<TimeSeries>, AnimationConfig) -> Result<()>,
{
    let series = Arc::new(data::loader::load_file(&args.data)?);
    let config = AnimationConfig::default();

    let shown = show(Arc::clone(&series), config.clone());
    if let Err(e) = &shown {
        log::error!("{e:#}");
    }

    if args.save {
        export::html::save_html(&args.data, &series, &config, SeriesColors::default())?;
    }

    shown
}

/// Open the native window and block until it is closed.
fn show_window(series: Arc<TimeSeries>, config: AnimationConfig) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 600.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Diffusion Animation",
        options,
        Box::new(move |_cc| Ok(Box::new(AnimApp::new(series, config)))),
    )
    .map_err(|e| anyhow!("display window failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positional_data_and_save_flag() {
        let args = Args::try_parse_from(["diffusion-anim", "out.csv", "-s"]).unwrap();
        assert_eq!(args.data, PathBuf::from("out.csv"));
        assert!(args.save);

        let args = Args::try_parse_from(["diffusion-anim", "--save", "out.csv"]).unwrap();
        assert!(args.save);
    }

    #[test]
    fn save_defaults_to_false() {
        let args = Args::try_parse_from(["diffusion-anim", "out.csv"]).unwrap();
        assert!(!args.save);
    }

    #[test]
    fn data_is_required() {
        assert!(Args::try_parse_from(["diffusion-anim"]).is_err());
    }

    fn write_scenario(dir: &std::path::Path) -> PathBuf {
        let data = dir.join("d.csv");
        std::fs::write(&data, "0,0,1,0\n0,1,0,1\n1,0,2,0\n1,1,0,2\n").unwrap();
        data
    }

    #[test]
    fn missing_input_fails_before_showing_or_saving() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args {
            data: dir.path().join("missing"),
            save: true,
        };
        let mut shown = false;

        let err = run(&args, |_, _| {
            shown = true;
            Ok(())
        })
        .unwrap_err();

        assert!(err.downcast_ref::<std::io::Error>().is_some());
        assert!(!shown);
        assert!(!export::html::output_path(&args.data).exists());
    }

    #[test]
    fn save_survives_a_display_failure() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args {
            data: write_scenario(dir.path()),
            save: true,
        };

        let err = run(&args, |_, _| Err(anyhow!("no display"))).unwrap_err();

        assert_eq!(err.to_string(), "no display");
        let html = std::fs::read_to_string(export::html::output_path(&args.data)).unwrap();
        assert!(html.contains("Time = 0"));
        assert!(html.contains("Time = 1"));
    }

    #[test]
    fn show_receives_every_frame_and_nothing_is_saved_without_flag() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args {
            data: write_scenario(dir.path()),
            save: false,
        };
        let mut frames = 0;

        run(&args, |series, config| {
            frames = series.len();
            assert_eq!(config.y_range, (-3.0, 3.0));
            Ok(())
        })
        .unwrap();

        assert_eq!(frames, 2);
        assert!(!export::html::output_path(&args.data).exists());
    }
}
