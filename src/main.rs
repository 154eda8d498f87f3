mod commands;
mod config;
mod domain;
mod infrastructure;
mod services;

use std::sync::Arc;
use std::time::Duration;

use poise::serenity_prelude as serenity;
use tracing_subscriber::EnvFilter;

use config::Config;
use domain::provider::ProviderCatalog;
use infrastructure::api::Translator;
use infrastructure::apple::AppleMusicClient;
use infrastructure::spotify::SpotifyClient;
use infrastructure::translator::{PassthroughTranslator, YandexTranslator};
use infrastructure::yandex::YandexMusicClient;
use infrastructure::youtube::YouTubeClient;
use services::adapters::{AppleAdapter, SpotifyAdapter, YandexAdapter, YouTubeAdapter};
use services::convert_service::ConvertService;
use services::matcher::CrossScriptMatcher;
use services::registry::Registry;

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

pub struct Data {
    pub convert_service: ConvertService,
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

fn build_translator(config: &Config, http: &reqwest::Client) -> Arc<dyn Translator> {
    match &config.translate {
        Some(translate) => Arc::new(YandexTranslator::new(
            http.clone(),
            translate.api_key.clone(),
            translate.folder_id.clone(),
        )),
        None => {
            tracing::info!("No translation backend configured, artist translation disabled");
            Arc::new(PassthroughTranslator)
        }
    }
}

async fn build_registry(
    config: &Config,
    http: &reqwest::Client,
    translator: Arc<dyn Translator>,
) -> Result<Registry, Error> {
    let spotify =
        SpotifyClient::new(&config.spotify_client_id, &config.spotify_client_secret).await?;
    let apple = AppleMusicClient::new(http.clone(), config.apple_music_token.clone());
    let yandex = YandexMusicClient::new(http.clone(), config.yandex_music_token.clone());
    let youtube = YouTubeClient::new(http.clone(), config.youtube_api_key.clone());

    Ok(Registry::new()
        .with(Arc::new(AppleAdapter::new(apple, config.apple_storefront.clone())))
        .with(Arc::new(SpotifyAdapter::new(spotify)))
        .with(Arc::new(YandexAdapter::new(
            yandex,
            CrossScriptMatcher::new(translator),
        )))
        .with(Arc::new(YouTubeAdapter::new(youtube))))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let http_client = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;
    let translator = build_translator(&config, &http_client);
    let catalog = Arc::new(ProviderCatalog::new()?);
    let registry = build_registry(&config, &http_client, translator.clone()).await?;
    let convert_service = ConvertService::new(catalog, Arc::new(registry), config.resolve_timeout);

    let intents = serenity::GatewayIntents::non_privileged();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![commands::link::link()],
            on_error: |error| {
                Box::pin(async move {
                    match error {
                        poise::FrameworkError::Command { error, ctx, .. } => {
                            let msg = error.to_string();
                            tracing::warn!("Command error: {msg}");
                            let _ = ctx.say(format!("❌ {msg}")).await;
                        }
                        other => {
                            if let Err(e) = poise::builtins::on_error(other).await {
                                tracing::error!("Error handling error: {e}");
                            }
                        }
                    }
                })
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                tracing::info!("Bot is ready!");
                Ok(Data { convert_service })
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .await?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutting down");
            shard_manager.shutdown_all().await;
        }
    });

    let result = client.start().await;

    if let Err(e) = translator.close() {
        tracing::warn!("Failed to close translator: {e}");
    }

    result?;
    Ok(())
}
