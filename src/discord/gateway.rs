//! Gateway event handling.
//!
//! Serenity runs each event on its own task. Handlers only coordinate
//! through the stores, whose locks keep concurrent XP updates from being lost.

use std::sync::Arc;

use serenity::async_trait;
use serenity::builder::{CreateInteractionResponse, CreateInteractionResponseMessage};
use serenity::model::application::{Command as SlashCommand, CommandInteraction, Interaction};
use serenity::model::channel::{Channel, ChannelType, Message};
use serenity::model::gateway::Ready;
use serenity::prelude::{Client, Context, EventHandler, GatewayIntents};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::commands::{Command, parse_command};
use crate::config::Config;
use crate::effects::{DiscordEffect, DiscordInterpreter};
use crate::events::{ChannelKind, InboundMessage, Invoker};
use crate::handlers::{CommandError, Stores, dispatch_command, handle_message};

use super::client::SerenityClient;
use super::commands::{decode_interaction, slash_commands};
use super::convert::{channel_id, guild_id, role_id, user_id};

/// Gateway intents the bot needs: guild messages with their content, and
/// member data for role membership.
pub fn gateway_intents() -> GatewayIntents {
    GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MEMBERS
}

/// Serenity event handler.
pub struct Handler {
    stores: Arc<Stores>,
    command_prefix: String,
}

impl Handler {
    pub fn new(stores: Arc<Stores>, command_prefix: impl Into<String>) -> Self {
        Handler {
            stores,
            command_prefix: command_prefix.into(),
        }
    }

    /// Runs a command and returns the reply and whether it reports an error.
    async fn run_command(
        &self,
        client: &SerenityClient,
        invoker: &Invoker,
        command: Command,
    ) -> (String, bool) {
        let name = command.name();
        match dispatch_command(&self.stores, client, invoker, command).await {
            Ok(reply) => (reply, false),
            Err(e) => {
                if let CommandError::Store(_) = e {
                    error!(command = name, user = %invoker.user, error = %e, "Command failed");
                } else {
                    debug!(command = name, user = %invoker.user, error = %e, "Command refused");
                }
                (e.reply().to_string(), true)
            }
        }
    }

    async fn handle_text_command(&self, ctx: &Context, client: &SerenityClient, msg: &Message) {
        let Some(command) = parse_command(&msg.content, &self.command_prefix) else {
            return;
        };

        let can_manage_roles = match command {
            Command::AddRankRole { .. } => member_can_manage_roles(ctx, msg).await,
            _ => false,
        };
        let invoker = Invoker {
            user: user_id(msg.author.id),
            guild: msg.guild_id.map(guild_id),
            can_manage_roles,
        };

        let (reply, _) = self.run_command(client, &invoker, command).await;
        let effect = DiscordEffect::SendMessage {
            channel: channel_id(msg.channel_id),
            content: reply,
        };
        if let Err(e) = client.interpret(effect).await {
            warn!(error = %e, "Failed to reply to text command");
        }
    }

    async fn handle_slash_command(&self, ctx: &Context, interaction: &CommandInteraction) {
        let Some((command, invoker)) = decode_interaction(interaction) else {
            warn!(command = %interaction.data.name, "Unrecognized slash command");
            return;
        };

        let client = SerenityClient::new(Arc::clone(&ctx.http));
        let (reply, ephemeral) = self.run_command(&client, &invoker, command).await;

        let response = CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new()
                .content(reply)
                .ephemeral(ephemeral),
        );
        if let Err(e) = interaction.create_response(ctx, response).await {
            warn!(error = %e, "Failed to respond to slash command");
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        match SlashCommand::set_global_commands(&ctx.http, slash_commands()).await {
            Ok(commands) => debug!(count = commands.len(), "Registered slash commands"),
            Err(e) => error!(error = %e, "Failed to register slash commands"),
        }
        info!(user = %ready.user.name, "Bot is ready");
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        let client = SerenityClient::new(Arc::clone(&ctx.http));

        // Direct messages earn no XP.
        if msg.guild_id.is_some() {
            let inbound = inbound_message(&ctx, &msg).await;
            if let Err(e) = handle_message(&self.stores, &client, &inbound).await {
                error!(user = %inbound.author, error = %e, "Failed to award XP");
            }
        }

        self.handle_text_command(&ctx, &client, &msg).await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::Command(command) = interaction {
            self.handle_slash_command(&ctx, &command).await;
        }
    }
}

/// Converts a gateway message into an [`InboundMessage`].
async fn inbound_message(ctx: &Context, msg: &Message) -> InboundMessage {
    let channel_kind = match msg.channel_id.to_channel(ctx).await {
        Ok(Channel::Guild(channel)) => channel_kind(channel.kind),
        Ok(_) => ChannelKind::Other,
        Err(e) => {
            debug!(channel = %msg.channel_id, error = %e, "Could not resolve channel kind");
            ChannelKind::Other
        }
    };

    let member_roles = msg
        .member
        .as_ref()
        .map(|member| member.roles.iter().copied().map(role_id).collect())
        .unwrap_or_default();

    InboundMessage {
        author: user_id(msg.author.id),
        author_is_bot: msg.author.bot,
        guild: msg.guild_id.map(guild_id),
        channel: channel_id(msg.channel_id),
        channel_kind,
        member_roles,
        content: msg.content.clone(),
    }
}

/// Maps a guild channel type to the kind announcements are gated on.
fn channel_kind(kind: ChannelType) -> ChannelKind {
    match kind {
        ChannelType::Text | ChannelType::News => ChannelKind::Text,
        _ => ChannelKind::Other,
    }
}

/// Checks the Manage Roles permission of a message author in its guild.
async fn member_can_manage_roles(ctx: &Context, msg: &Message) -> bool {
    let Some(guild) = msg.guild_id else {
        return false;
    };
    let member = match msg.member(ctx).await {
        Ok(member) => member,
        Err(e) => {
            debug!(user = %msg.author.id, error = %e, "Could not fetch member");
            return false;
        }
    };

    ctx.cache
        .guild(guild)
        .map(|guild| guild.member_permissions(&member).manage_roles())
        .unwrap_or(false)
}

/// Connects to the gateway and processes events until `shutdown` is cancelled.
pub async fn run(
    config: &Config,
    stores: Arc<Stores>,
    shutdown: CancellationToken,
) -> Result<(), serenity::Error> {
    let handler = Handler::new(stores, config.command_prefix.clone());
    let mut client = Client::builder(&config.token, gateway_intents())
        .event_handler(handler)
        .await?;

    let shard_manager = Arc::clone(&client.shard_manager);
    tokio::spawn(async move {
        shutdown.cancelled().await;
        info!("Disconnecting from the gateway");
        shard_manager.shutdown_all().await;
    });

    client.start().await
}
