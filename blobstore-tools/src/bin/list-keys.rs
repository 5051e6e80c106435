use anyhow::Result;
use blobstore_tools::utils::{display_key, StoreArgs};
use clap::Parser;
use colored::Colorize;

#[derive(Parser)]
struct Cli {
    #[clap(flatten)]
    store: StoreArgs,
    /// The prefix in a bucket
    #[clap(short, long)]
    prefix: String,
    /// head
    #[clap(long, default_value = "10")]
    head: usize,
    /// Output csv path, one key per row
    #[clap(short, long)]
    output_path: Option<String>,
    /// keep the prefix from the key in the output - by default it is removed
    #[clap(long, default_value = "false")]
    keep_prefix: bool,
}

fn write_keys(output_path: &str, keys: &[String], prefix: &str, keep_prefix: bool) -> Result<()> {
    let mut writer = csv::Writer::from_path(output_path)?;
    writer.write_record(["key"])?;
    for key in keys {
        writer.write_record([display_key(key, prefix, keep_prefix)])?;
    }
    writer.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Cli::parse();

    let store = args.store.connect().await;

    let (keys, failure) = match store.list(&args.prefix).await {
        Ok(keys) => (keys, None),
        Err(e) => {
            let (keys, source) = e.into_parts();
            (keys, Some(source))
        }
    };

    let prefix = &args.prefix;
    if let Some(output_path) = &args.output_path {
        write_keys(output_path, &keys, prefix, args.keep_prefix)?;
    }

    println!("{}", format!("Found {} keys.", keys.len()).bold());
    if !keys.is_empty() {
        println!(
            "{}",
            format!("Listing first {}...", std::cmp::min(args.head, keys.len()))
                .italic()
                .underline()
        );
    }
    keys.iter().take(args.head).for_each(|key| {
        println!("  {}", display_key(key, prefix, args.keep_prefix).bold());
    });

    if let Some(source) = failure {
        println!(
            "{}",
            "Listing stopped early; the keys above are partial.".red()
        );
        return Err(source.into());
    }

    Ok(())
}
