use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use triage_core::{
    classify,
    config::{locale_from_env_value, word_limit_from_env_value},
    CoreConfig, KnowledgeBase, Locale, TriageService, Turn,
};
use triage_model::{ChatCompletionsClient, ModelClient, ModelConfig};

#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Symptom triage assistant CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a message (emergency, false alarm, severity)
    Classify {
        message: String,
        /// Emergency already asserted by an earlier turn
        #[arg(long)]
        emergency: bool,
    },
    /// Look up catalog guidance for a message
    Analyze {
        message: String,
        /// Locale tag (en, es, fr)
        #[arg(long)]
        locale: Option<String>,
    },
    /// Print the prompt that would be sent to the model
    Prompt {
        message: String,
        #[arg(long)]
        locale: Option<String>,
        #[arg(long)]
        emergency: bool,
        /// Answer to an earlier follow-up question (repeatable)
        #[arg(long = "follow-up")]
        follow_up: Vec<String>,
    },
    /// Send a message to the configured model and print the reply
    Chat {
        message: String,
        #[arg(long)]
        locale: Option<String>,
        #[arg(long)]
        emergency: bool,
        #[arg(long = "follow-up")]
        follow_up: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Classify { message, emergency }) => {
            let result = classify(&message, emergency);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Some(Commands::Analyze { message, locale }) => {
            let service = service()?;
            let locale = locale
                .as_deref()
                .map(Locale::from_tag)
                .unwrap_or(service.config().default_locale());
            let analysis = service.knowledge().analyze(&message, locale);
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
        Some(Commands::Prompt {
            message,
            locale,
            emergency,
            follow_up,
        }) => {
            let assessment = service()?.assess(&turn(message, locale, emergency, follow_up))?;
            println!("{}", assessment.prompt);
        }
        Some(Commands::Chat {
            message,
            locale,
            emergency,
            follow_up,
        }) => {
            let assessment = service()?.assess(&turn(message, locale, emergency, follow_up))?;
            if assessment.classification.is_emergency {
                eprintln!("!! This may be an emergency. Call your local emergency number now.");
            }

            let model = ChatCompletionsClient::new(ModelConfig::from_env_values(
                std::env::var("GROQ_API_KEY").ok(),
                std::env::var("TRIAGE_MODEL_BASE_URL").ok(),
                std::env::var("TRIAGE_MODEL").ok(),
                std::env::var("TRIAGE_MAX_TOKENS").ok(),
                std::env::var("TRIAGE_MODEL_TIMEOUT_SECS").ok(),
            )?)?;
            let reply = model.generate(&assessment.prompt).await?;
            println!("{reply}");
        }
        None => {
            println!("Use 'triage --help' for commands");
        }
    }

    Ok(())
}

fn service() -> anyhow::Result<TriageService> {
    KnowledgeBase::builtin().validate()?;
    let cfg = CoreConfig::new(
        locale_from_env_value(std::env::var("TRIAGE_DEFAULT_LOCALE").ok()),
        word_limit_from_env_value(std::env::var("TRIAGE_RESPONSE_WORD_LIMIT").ok())?,
    )?;
    Ok(TriageService::new(Arc::new(cfg)))
}

fn turn(message: String, locale: Option<String>, emergency: bool, follow_up: Vec<String>) -> Turn {
    Turn {
        message,
        is_emergency: emergency,
        locale: locale.as_deref().map(Locale::from_tag),
        follow_up_answers: follow_up,
    }
}
