use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;
use topic_cloud::config::AppConfig;
use topic_cloud::{CloudState, Pipeline, Progress, Session};

mod args;
use args::{Args, Command, convert_source};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let Some(font) = args.font.clone() else {
        eprintln!("ワードクラウド作成のため、日本語のフォントパスを --font で指定してください");
        return ExitCode::FAILURE;
    };
    if !font.is_file() {
        eprintln!("フォントパスが正しくありません。もう一度確認してください。: {}", font.display());
        return ExitCode::FAILURE;
    }

    let mut config = match &args.config {
        Some(path) => match AppConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                ::log::error!("Failed to load config {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => AppConfig::default(),
    };
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }

    let mut pipeline = Pipeline::new(font).with_config(config);
    if let Command::Scrape {
        delay: Some(secs), ..
    } = &args.command
    {
        pipeline = pipeline.with_delay(Duration::from_secs(*secs));
    }

    let source = convert_source(&args.command);
    ::log::info!("Starting word cloud run for {:?}", source);

    let mut session = Session::new();
    if let Err(e) = pipeline.run(&source, &mut session, report_progress).await {
        ::log::error!("Run aborted: {}", e);
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    match session.state() {
        CloudState::Rendered(image) => {
            if let Err(e) = image.save(&args.output) {
                ::log::error!("Failed to write {}: {}", args.output.display(), e);
                return ExitCode::FAILURE;
            }
            println!("{}", args.output.display());
            ExitCode::SUCCESS
        }
        CloudState::Failed(e) => {
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
        CloudState::Idle | CloudState::Generating => ExitCode::FAILURE,
    }
}

fn report_progress(progress: Progress) {
    eprintln!(
        "記事取得中・・・　{}/{} ({:.0}%)",
        progress.current,
        progress.total,
        progress.fraction() * 100.0
    );
}
