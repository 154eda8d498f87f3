use poise::CreateReply;
use poise::serenity_prelude::{Colour, CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter};

use crate::domain::entity::Entity;
use crate::domain::provider::Provider;
use crate::services::convert_service::{Conversion, TargetOutcome};
use crate::{Context, Error};

pub fn provider_colour(provider: Provider) -> Colour {
    match provider {
        Provider::AppleMusic => Colour::new(0xFA243C),
        Provider::Spotify => Colour::new(0x1DB954),
        Provider::Yandex => Colour::new(0xFFCC00),
        Provider::YouTube => Colour::new(0xFF0000),
    }
}

pub fn linked_title(entity: &Entity) -> String {
    if entity.url.is_empty() {
        format!("**{}** - {}", entity.title, entity.artist)
    } else {
        format!("[**{}** - {}]({})", entity.title, entity.artist, entity.url)
    }
}

pub fn target_line(provider: Provider, outcome: &TargetOutcome) -> String {
    match outcome {
        TargetOutcome::Found(entity) => format!("{}: {}", provider.name(), linked_title(entity)),
        TargetOutcome::NotFound => format!("{}: not found", provider.name()),
        TargetOutcome::Failed(_) => format!("{}: unavailable right now", provider.name()),
    }
}

fn conversion_embed(conversion: &Conversion) -> CreateEmbed {
    let source = &conversion.source;
    let lines: Vec<String> = conversion
        .targets
        .iter()
        .map(|(provider, outcome)| target_line(*provider, outcome))
        .collect();

    CreateEmbed::new()
        .author(CreateEmbedAuthor::new(source.provider.name()))
        .description(format!("{}\n\n{}", linked_title(source), lines.join("\n")))
        .footer(CreateEmbedFooter::new(source.entity_type.as_str()))
        .colour(provider_colour(source.provider))
}

/// Find a track or album on every supported service
#[poise::command(slash_command)]
pub async fn link(
    ctx: Context<'_>,
    #[description = "Apple Music, Spotify, Yandex Music or YouTube link"] url: String,
) -> Result<(), Error> {
    let service = &ctx.data().convert_service;
    let link = service.detect(&url)?;

    ctx.defer().await?;

    let conversion = service.convert(&link).await?;
    ctx.send(CreateReply::default().embed(conversion_embed(&conversion)))
        .await?;
    Ok(())
}
