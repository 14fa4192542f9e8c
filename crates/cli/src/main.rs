use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use story_core::config::{resolve_resources_dir, seen_store_path_from_env_value};
use story_core::constants::DEFAULT_RESOURCES_DIR;
use story_core::{
    BroadcastEventBus, CoreConfig, JsonFileFlagStore, SeenStateTracker, Story, StoryContent,
    StoryDecoder, StoryId,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "story")]
#[command(about = "Decode stories and track which ones have been seen")]
struct Cli {
    /// Bundled resources directory (overrides STORY_RESOURCES_DIR)
    #[arg(long, global = true)]
    resources: Option<PathBuf>,
    /// Seen-state file (overrides STORY_SEEN_STORE)
    #[arg(long, global = true)]
    seen_store: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a story JSON file and print a summary
    Decode {
        /// Path to the JSON document
        file: PathBuf,
        /// Treat the document as an array of stories
        #[arg(long)]
        list: bool,
    },
    /// Print whether a story has been seen
    Seen {
        /// Story identifier
        story_id: String,
    },
    /// Mark a story as seen
    MarkSeen {
        /// Story identifier
        story_id: String,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("story=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let seen_store = cli.seen_store.clone().unwrap_or_else(|| {
        seen_store_path_from_env_value(std::env::var("STORY_SEEN_STORE").ok())
    });
    let resources_override = cli.resources.clone().or_else(|| {
        std::env::var("STORY_RESOURCES_DIR")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    });

    match cli.command {
        Some(Commands::Decode { file, list }) => {
            let resources_dir = resolve_resources_dir(resources_override)?;
            let config = CoreConfig::with_defaults(resources_dir, seen_store)?;
            let decoder = StoryDecoder::from_config(&config)?;
            let tracker = tracker_from_config(&config, Arc::new(BroadcastEventBus::new()))?;

            let bytes = std::fs::read(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let stories = if list {
                decoder.decode_stories(&bytes)?
            } else {
                vec![decoder.decode_slice(&bytes)?]
            };

            tracing::info!(count = stories.len(), file = %file.display(), "decoded stories");
            for story in &stories {
                print_story(story, &tracker);
            }
        }
        Some(Commands::Seen { story_id }) => {
            let tracker = seen_tracker(resources_override, seen_store)?;
            let story_id: StoryId = story_id.parse()?;
            println!("{}: {}", story_id, tracker.is_seen(&story_id));
        }
        Some(Commands::MarkSeen { story_id }) => {
            let bus = Arc::new(BroadcastEventBus::new());
            let mut events = bus.subscribe();
            let tracker = seen_tracker_with_bus(resources_override, seen_store, bus)?;
            let story_id: StoryId = story_id.parse()?;

            if tracker.mark_seen(&story_id)? {
                while let Ok(event) = events.try_recv() {
                    println!("{} {}", event.name(), event.payload());
                }
            } else {
                println!("{} already seen", story_id);
            }
        }
        None => {
            println!("Use 'story --help' for commands");
        }
    }

    Ok(())
}

fn seen_tracker(
    resources_override: Option<PathBuf>,
    seen_store: PathBuf,
) -> anyhow::Result<SeenStateTracker> {
    seen_tracker_with_bus(resources_override, seen_store, Arc::new(BroadcastEventBus::new()))
}

// Seen commands never read bundled resources, so the directory is not required to exist.
fn seen_tracker_with_bus(
    resources_override: Option<PathBuf>,
    seen_store: PathBuf,
    bus: Arc<BroadcastEventBus>,
) -> anyhow::Result<SeenStateTracker> {
    let resources_dir =
        resources_override.unwrap_or_else(|| PathBuf::from(DEFAULT_RESOURCES_DIR));
    let config = CoreConfig::with_defaults(resources_dir, seen_store)?;
    tracker_from_config(&config, bus)
}

fn tracker_from_config(
    config: &CoreConfig,
    bus: Arc<BroadcastEventBus>,
) -> anyhow::Result<SeenStateTracker> {
    let store = JsonFileFlagStore::open(config.seen_store_path()).with_context(|| {
        format!(
            "failed to open seen store {}",
            config.seen_store_path().display()
        )
    })?;

    Ok(SeenStateTracker::from_config(config, Arc::new(store), bus))
}

fn print_story(story: &Story, tracker: &SeenStateTracker) {
    println!(
        "ID: {}, Name: {}, Nature: {}, Seen: {}, Items: {}",
        story.id(),
        story.name(),
        story.content_nature(),
        story.is_seen(tracker),
        story.content().len()
    );

    let preview = story.preview_image();
    match (preview.remote_url(), preview.image()) {
        (Some(url), _) => println!("  preview: {}", url),
        (None, Some(image)) => println!(
            "  preview: {} ({}, {} bytes)",
            preview.reference(),
            image.media_type(),
            image.bytes().len()
        ),
        (None, None) => println!("  preview: {} (unavailable)", preview.reference()),
    }

    for (index, content) in story.content().iter().enumerate() {
        print_content(index, content);
    }
}

fn print_content(index: usize, content: &StoryContent) {
    let link = content
        .external_interaction_url()
        .map(|url| format!(", link: {}", url))
        .unwrap_or_default();
    println!(
        "  [{}] {} {} for {}s{}",
        index,
        content.kind(),
        content.asset_reference(),
        content.duration_secs(),
        link
    );
}
