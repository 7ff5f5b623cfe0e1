use std::sync::Arc;

use clap::Parser;
use inquire::{InquireError, Text};

use meteo_core::provider::open_meteo::{OpenMeteoForecast, OpenMeteoGeocoder};
use meteo_core::{DisplayModel, QueryController, QueryState, default_http_client};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "meteo", version, about = "City weather lookup")]
pub struct Cli {
    /// City looked up automatically on startup.
    #[arg(default_value = "Taipei")]
    pub city: String,

    /// Language hint passed to the geocoder.
    #[arg(long, default_value = "en")]
    pub language: String,

    /// Exit after the startup lookup instead of prompting for more cities.
    #[arg(long)]
    pub once: bool,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let http = default_http_client()?;
        let resolver = Arc::new(OpenMeteoGeocoder::new(http.clone()));
        let forecast = Arc::new(OpenMeteoForecast::new(http));
        let mut controller = QueryController::new(resolver, forecast, self.language);

        // One automatic lookup on startup, never repeated.
        controller.set_query(self.city);
        if controller.search() {
            controller.wait().await;
        }
        render(&controller.state());

        if self.once {
            return Ok(());
        }

        loop {
            let input = match Text::new("City:")
                .with_help_message("at least 2 characters; Esc to quit")
                .prompt()
            {
                Ok(input) => input,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                    break;
                }
                Err(e) => return Err(e.into()),
            };

            controller.set_query(input);
            if !controller.search() {
                println!("Please enter at least 2 characters.");
                continue;
            }
            controller.wait().await;
            render(&controller.state());
        }

        Ok(())
    }
}

fn render(state: &QueryState) {
    match state {
        QueryState::Idle => println!("Enter a city to look up its weather."),
        QueryState::Loading => println!("Loading..."),
        QueryState::Failure(message) => println!("warning: {message}"),
        QueryState::Success(model) => render_card(model),
    }
}

fn render_card(model: &DisplayModel) {
    println!();
    println!("{}", model.location);
    println!("updated {}", model.updated_at.format("%Y-%m-%d %H:%M"));
    println!(
        "{:.0}\u{b0}C (feels like {:.0}\u{b0}C)",
        model.temperature, model.apparent
    );
    if !model.next_hours.is_empty() {
        println!("next hours:");
        for entry in &model.next_hours {
            println!("  {}  {:>3.0}\u{b0}", entry.time.format("%d-%m %H:%M"), entry.temp);
        }
    }
    println!();
}
