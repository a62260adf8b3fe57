use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::process::ExitCode;
use wordy::cli::{Cli, PlainDisplay, parse_cli, run_plain};
use wordy::logging::init_logging;
use wordy::tui::{TuiView, run_tui};
use wordy::{KeyBindings, Settings, WordyController, WordyError, WordyModel, load_configured_word_list};

fn main() -> ExitCode {
    let cli = parse_cli();
    if let Err(e) = init_logging(cli.log_file.as_deref()) {
        eprintln!("Failed to open log file: {e}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), WordyError> {
    let mut settings = Settings::load(cli.settings_path.as_deref())?;
    cli.apply_overrides(&mut settings);
    settings.validate()?;

    let word_list = load_configured_word_list(&settings)?;
    log::info!("Loaded {} words.", word_list.len());

    let mut rng = StdRng::from_os_rng();
    let model = WordyModel::new(
        word_list,
        cli.word.as_deref(),
        settings.evaluation_mode,
        &mut rng,
    )?;
    let bindings = KeyBindings::from_layout(&settings.ui.keyboard.key_layout)?;

    if cli.plain {
        let display = PlainDisplay::new(io::stdout(), &settings);
        let mut controller = WordyController::new(model, display, &settings, rng);
        run_plain(&mut controller, &bindings, io::stdin().lock())?;
    } else {
        let mut controller = WordyController::new(model, TuiView::new(&settings), &settings, rng);
        run_tui(&mut controller, &bindings)?;
    }
    Ok(())
}
