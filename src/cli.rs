use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::{
    api::{ArticleFilter, Client},
    editor::{EditorMode, EditorUploader, load_mode, store_mode},
    error::Result,
    import::ArticleImport,
    model::{BuildOutcome, ConfigUpdate, Id},
    settings::Settings,
    toast::{ToastKind, ToastQueue},
    upload::UploadFile,
};

/// 杂志后台命令行客户端
#[derive(Debug, Parser)]
#[command(name = "magdesk", version)]
pub struct Cli {
    /// 覆盖配置中的后端地址
    #[arg(long, global = true)]
    pub origin: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(subcommand)]
    Articles(ArticlesCommand),
    #[command(subcommand)]
    Magazines(MagazinesCommand),
    #[command(subcommand)]
    Images(ImagesCommand),
    #[command(subcommand)]
    Config(ConfigCommand),
    #[command(subcommand)]
    Editor(EditorCommand),
}

#[derive(Debug, Subcommand)]
pub enum ArticlesCommand {
    List {
        #[arg(long)]
        magazine: Option<Id>,
        #[arg(long)]
        search: Option<String>,
    },
    /// 从 Markdown 文件导入文章
    Import {
        file: PathBuf,
        /// 导入后加入该期刊
        #[arg(long)]
        magazine: Option<Id>,
    },
    /// 生成摘要
    Summary { id: Id },
}

#[derive(Debug, Subcommand)]
pub enum MagazinesCommand {
    List,
    /// 构建 PDF
    Build { id: Id },
    PdfUrl { id: Id },
}

#[derive(Debug, Subcommand)]
pub enum ImagesCommand {
    /// 通过编辑器上传接口上传图片，上传前会做本地校验
    Upload {
        file: PathBuf,
        #[arg(long)]
        article: Option<Id>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    Get { key: Option<String> },
    Set { key: String, value: String },
}

#[derive(Debug, Subcommand)]
pub enum EditorCommand {
    /// 查看或设置编辑模式（wysiwyg / plain）
    Mode { mode: Option<String> },
    /// 在两种编辑模式之间切换
    Toggle,
}

/// 执行命令，结果以 JSON 打印到标准输出，提示信息进入通知队列
pub async fn execute(cli: Cli, settings: Settings, toasts: &ToastQueue) -> Result<()> {
    let mut settings = settings;
    if let Some(origin) = cli.origin {
        settings.api.origin = origin;
    }
    let client = Client::from_settings(&settings.api)?;

    match cli.command {
        Command::Articles(cmd) => articles(&client, cmd, toasts).await,
        Command::Magazines(cmd) => magazines(&client, cmd, toasts).await,
        Command::Images(ImagesCommand::Upload { file, article }) => {
            let uploader = EditorUploader::new(&client, &settings);
            let url = uploader
                .upload(UploadFile::from_path(file).await?, article)
                .await?;
            toasts.success("Image uploaded", None);
            print_json(&url)
        }
        Command::Config(ConfigCommand::Get { key: Some(key) }) => {
            print_json(&client.config().get(&key).await?)
        }
        Command::Config(ConfigCommand::Get { key: None }) => {
            print_json(&client.config().get_all().await?)
        }
        Command::Editor(cmd) => editor_mode(&settings, cmd, toasts),
        Command::Config(ConfigCommand::Set { key, value }) => {
            let ack = client
                .config()
                .update(&ConfigUpdate::from([(key, value)]))
                .await?;
            toasts.success("Configuration saved", None);
            print_json(&ack)
        }
    }
}

async fn articles(client: &Client, cmd: ArticlesCommand, toasts: &ToastQueue) -> Result<()> {
    match cmd {
        ArticlesCommand::List { magazine, search } => {
            let filter = ArticleFilter {
                magazine_id: magazine,
                search,
            };
            print_json(&client.articles().list(&filter).await?)
        }
        ArticlesCommand::Import { file, magazine } => {
            let import = ArticleImport::from_path(&file).await?;
            let article = client.articles().create(&import.into_patch()).await?;
            toasts.success(format!("Imported \"{}\"", article.title), None);

            if let Some(magazine_id) = magazine {
                let ack = client
                    .magazines()
                    .add_article(magazine_id, article.id, None)
                    .await?;
                if ack.already_assigned() {
                    toasts.warning("Article already in this issue", None);
                }
            }
            print_json(&article)
        }
        ArticlesCommand::Summary { id } => {
            let article = client.articles().generate_summary(id).await?;
            toasts.success("Summary generated", None);
            print_json(&article)
        }
    }
}

async fn magazines(client: &Client, cmd: MagazinesCommand, toasts: &ToastQueue) -> Result<()> {
    match cmd {
        MagazinesCommand::List => print_json(&client.magazines().list().await?),
        MagazinesCommand::Build { id } => {
            let outcome = client.magazines().build(id).await?;
            match &outcome {
                BuildOutcome::Built { .. } => toasts.success("PDF built", None),
                BuildOutcome::Failed { error } => toasts.error(format!("Build failed: {error}"), None),
            };
            print_json(&outcome)
        }
        MagazinesCommand::PdfUrl { id } => print_json(&client.magazines().pdf_url(id)),
    }
}

fn editor_mode(settings: &Settings, cmd: EditorCommand, toasts: &ToastQueue) -> Result<()> {
    let mut prefs = settings.preferences()?;
    let mode = match cmd {
        EditorCommand::Mode { mode: None } => load_mode(&prefs),
        EditorCommand::Mode { mode: Some(mode) } => {
            let mode: EditorMode = mode.parse()?;
            store_mode(&mut prefs, mode)?;
            toasts.info(format!("Editor mode: {mode}"), None);
            mode
        }
        EditorCommand::Toggle => {
            let mode = load_mode(&prefs).toggled();
            store_mode(&mut prefs, mode)?;
            toasts.info(format!("Editor mode: {mode}"), None);
            mode
        }
    };
    print_json(&mode)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// 把队列中的通知输出到标准错误
pub fn drain_toasts(toasts: &ToastQueue) {
    for toast in toasts.snapshot() {
        let marker = match toast.kind {
            ToastKind::Success => "✅",
            ToastKind::Error => "❌",
            ToastKind::Warning => "⚠️",
            ToastKind::Info => "ℹ️",
        };
        eprintln!("{marker} {}", toast.text);
    }
    toasts.clear();
}
