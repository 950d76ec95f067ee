pub mod studio;

use std::io::{self, Read};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use studio::backend::{HttpBackend, InProcessBackend, PodcastBackend};
use studio::form::{ContentForm, MediaType};
use studio::player::{download_link, share_action, SharePlatform, ShareAction};
use studio::server::{self, AppState};
use studio::speakers;
use studio::types::{ApiConfig, Credentials, ProviderEndpoints, DEFAULT_BOTNOI_BASE_URL, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser, Debug)]
#[command(name = "podcast-studio", version)]
#[command(about = "Generate a podcast script with an LLM and turn it into speech")]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server exposing /api/generate-script and /api/generate-voice
    Serve(ServeArgs),
    /// Print the bundled speaker catalog
    Speakers,
    /// Generate a script (and optionally its audio) from the command line
    Create(CreateArgs),
}

#[derive(Args, Debug, Clone)]
struct UpstreamArgs {
    /// Gemini API base URL
    #[arg(long, default_value = DEFAULT_GEMINI_BASE_URL, env = "GEMINI_BASE_URL")]
    gemini_url: String,

    /// Gemini model used for script generation
    #[arg(long, default_value = DEFAULT_GEMINI_MODEL, env = "GEMINI_MODEL")]
    gemini_model: String,

    /// Botnoi voice API base URL
    #[arg(long, default_value = DEFAULT_BOTNOI_BASE_URL, env = "BOTNOI_BASE_URL")]
    botnoi_url: String,

    /// Upstream request timeout in seconds
    #[arg(long, default_value_t = 60, env = "PODCAST_STUDIO_UPSTREAM_TIMEOUT")]
    timeout_secs: u64,
}

impl UpstreamArgs {
    fn into_config(self) -> ApiConfig {
        ApiConfig {
            endpoints: ProviderEndpoints {
                gemini_base_url: self.gemini_url,
                gemini_model: self.gemini_model,
                botnoi_base_url: self.botnoi_url,
                timeout: Duration::from_secs(self.timeout_secs),
            },
            credentials: Credentials::Env,
        }
    }
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1", env = "PODCAST_STUDIO_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 3000, env = "PODCAST_STUDIO_PORT")]
    port: u16,

    #[command(flatten)]
    upstream: UpstreamArgs,
}

#[derive(Args, Debug)]
struct CreateArgs {
    /// Podcast title
    #[arg(long, default_value = "")]
    title: String,

    /// Idea or topic for the episode
    #[arg(long)]
    prompt: String,

    /// Speaker id from `podcast-studio speakers`
    #[arg(long, default_value = "1")]
    speaker: String,

    /// Use this file's text as the script and skip script generation ("-" reads stdin)
    #[arg(long)]
    script_file: Option<PathBuf>,

    /// Also synthesize the script into audio
    #[arg(long)]
    voice: bool,

    /// Talk to a running server instead of calling the providers directly
    #[arg(long, env = "PODCAST_STUDIO_SERVER")]
    server: Option<String>,

    /// Page URL used in share links
    #[arg(long, default_value = "http://localhost:3000/")]
    page_url: String,

    #[arg(long, hide = true)]
    volume: Option<f64>,

    #[arg(long, hide = true)]
    speed: Option<f64>,

    #[arg(long, hide = true)]
    type_media: Option<MediaType>,

    #[command(flatten)]
    upstream: UpstreamArgs,
}

pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,hyper=warn,reqwest=warn")),
        )
        .with_writer(io::stderr)
        .init();
}

pub async fn run(cli: Cli) -> Result<(), BoxError> {
    match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Speakers => {
            for s in speakers::catalog() {
                println!("{}\t{}", s.id, s.name);
            }
            Ok(())
        }
        Command::Create(args) => create(args).await,
    }
}

async fn serve(args: ServeArgs) -> Result<(), BoxError> {
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let state = AppState::new(args.upstream.into_config())?;
    server::serve(addr, state).await?;
    Ok(())
}

async fn create(args: CreateArgs) -> Result<(), BoxError> {
    let timeout = Duration::from_secs(args.upstream.timeout_secs);
    let backend: Box<dyn PodcastBackend> = match &args.server {
        Some(url) => Box::new(HttpBackend::new(url, timeout)?),
        None => Box::new(InProcessBackend::new(AppState::new(
            args.upstream.clone().into_config(),
        )?)),
    };

    let mut form = ContentForm::new();
    form.set_title(args.title.as_str());
    form.set_prompt(args.prompt.as_str());
    form.voice_mut().select_speaker(&args.speaker)?;
    if let Some(v) = args.volume {
        form.voice_mut().set_volume(v);
    }
    if let Some(s) = args.speed {
        form.voice_mut().set_speed(s);
    }
    if let Some(t) = args.type_media {
        form.voice_mut().set_type_media(t);
    }

    match &args.script_file {
        Some(path) => {
            let edited = read_script(path)?;
            info!(path = %path.display(), "using script from file");
            form.edit_script(edited);
        }
        None => {
            if !form.generate_script(backend.as_ref()).await {
                return Err("script generation failed; see log for details".into());
            }
        }
    }

    println!("{}", form.script());

    if !args.voice {
        return Ok(());
    }

    let audio = form
        .generate_voice(backend.as_ref())
        .await
        .ok_or("voice generation failed; see log for details")?;
    if audio.url.is_empty() {
        return Err("voice provider returned no audio url".into());
    }

    let link = download_link(&audio.url, form.title());
    println!();
    println!("audio:    {}", audio.url);
    println!("download: {}", link.filename);
    for platform in [SharePlatform::Facebook, SharePlatform::Twitter, SharePlatform::Clipboard] {
        match share_action(platform, form.title(), &args.page_url) {
            ShareAction::OpenWindow { url } => println!("share:    {}", url),
            ShareAction::CopyToClipboard { text, .. } => println!("copy:     {}", text),
        }
    }
    Ok(())
}

fn read_script(path: &Path) -> io::Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path)
    }
}
