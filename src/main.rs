//! flowtts - TRTC AI 语音合成命令行

use anyhow::Context;
use clap::{Parser, Subcommand};
use futures_util::StreamExt;
use std::path::PathBuf;

use flow_tts::config::{load_config_from_path, print_config, FlowTtsConfig};
use flow_tts::{AudioCodec, FlowTts, StreamEvent, SynthesisOptions};

/// Flow TTS - TRTC AI 语音合成
#[derive(Parser, Debug)]
#[command(name = "flowtts")]
#[command(version, about, long_about = None)]
struct Cli {
    /// 配置文件路径（默认搜索 flowtts.toml / flowtts.local.toml）
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// 音色名或音色 ID
    #[arg(long, global = true)]
    voice: Option<String>,

    /// 模型名（flow-01-turbo / flow-01-ex）
    #[arg(long, global = true)]
    model: Option<String>,

    /// 音频编码（wav / mp3 / pcm / ...），仅用于同步合成
    #[arg(long, global = true)]
    format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 同步合成并写入文件
    Speak {
        text: String,
        /// 输出文件（默认 output.<编码扩展名>）
        output: Option<PathBuf>,
    },

    /// 流式合成（PCM）并写入文件
    Stream {
        text: String,
        /// 输出文件（默认 output.pcm）
        output: Option<PathBuf>,
    },

    /// 列出音色
    Voices {
        /// 模型名，默认 flow-01-turbo
        model: Option<String>,
    },

    /// 搜索音色（名称、语言、描述）
    Search { query: String },
}

impl Cli {
    fn synthesis_options(&self, text: &str) -> SynthesisOptions {
        let mut options = SynthesisOptions::new(text);
        if let Some(voice) = &self.voice {
            options = options.with_voice(voice.clone());
        }
        if let Some(model) = &self.model {
            options = options.with_model(model.clone());
        }
        if let Some(format) = &self.format {
            options = options.with_codec(AudioCodec::parse(format));
        }
        options
    }
}

fn init_tracing(config: &FlowTtsConfig) {
    let log_filter = format!("{},flow_tts={}", config.log.level, config.log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config_from_path(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
    init_tracing(&config);
    print_config(&config);

    let client = FlowTts::new(config)?;

    match &cli.command {
        Commands::Speak { text, output } => {
            let options = cli.synthesis_options(text);
            let output = output
                .clone()
                .unwrap_or_else(|| PathBuf::from(format!("output.{}", options.codec.extension())));

            let result = client.synthesize(options).await?;
            tokio::fs::write(&output, &result.audio)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;

            tracing::info!(
                session_id = %result.session_id,
                request_id = ?result.request_id,
                language = ?result.detected_language,
                bytes = result.audio.len(),
                output = %output.display(),
                "Audio saved"
            );
        }
        Commands::Stream { text, output } => {
            let output = output.clone().unwrap_or_else(|| PathBuf::from("output.pcm"));

            let mut stream = client.synthesize_stream(cli.synthesis_options(text))?;
            let mut audio = Vec::new();
            while let Some(event) = stream.next().await {
                match event {
                    StreamEvent::Chunk(chunk) => {
                        tracing::debug!(
                            seq = chunk.subtitle_seq,
                            bytes = chunk.audio.len(),
                            "Chunk received"
                        );
                        audio.extend_from_slice(&chunk.audio);
                    }
                    StreamEvent::Completed => break,
                    StreamEvent::Failed(e) => return Err(e.into()),
                }
            }

            tokio::fs::write(&output, &audio)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;
            tracing::info!(bytes = audio.len(), output = %output.display(), "PCM audio saved");
        }
        Commands::Voices { model } => {
            let model = model
                .as_deref()
                .or(cli.model.as_deref())
                .unwrap_or(flow_tts::ModelName::TURBO);
            for voice in client.list_voices(model) {
                println!("{}\t{}\t{}", voice.id, voice.name, voice.language);
            }
        }
        Commands::Search { query } => {
            for voice in client.search_voices(query, cli.model.as_deref()) {
                println!("{}\t{}\t{}", voice.id, voice.name, voice.language);
            }
        }
    }

    Ok(())
}
