use anyhow::{bail, Context, Result};
use blobstore::ByteStream;
use blobstore_tools::utils::StoreArgs;
use clap::Parser;
use log::info;
use tokio::io::AsyncReadExt;

#[derive(Parser)]
struct Cli {
    /// Operation: put, get
    op: String,
    #[clap(flatten)]
    store: StoreArgs,
    /// The key in a bucket
    #[clap(short, short_alias = 'p', long)]
    key: String,
    /// local_path: source for put, destination for get; stdin/stdout when omitted
    #[clap(short, long)]
    local_path: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Cli::parse();

    let store = args.store.connect().await;

    match args.op.as_str() {
        "put" => match &args.local_path {
            Some(local_path) => {
                store.put_file(&args.key, local_path).await?;
                info!("Uploaded {} to {}", local_path, args.key);
            }
            None => {
                let mut content = vec![];
                tokio::io::stdin()
                    .read_to_end(&mut content)
                    .await
                    .context("reading stdin")?;
                store.put(&args.key, ByteStream::from(content)).await?;
            }
        },
        "get" => {
            let body = store.get(&args.key).await?;
            let mut reader = body.into_async_read();
            match &args.local_path {
                Some(local_path) => {
                    let mut file = tokio::fs::File::create(local_path)
                        .await
                        .with_context(|| format!("creating {local_path}"))?;
                    let n = tokio::io::copy(&mut reader, &mut file).await?;
                    info!("Downloaded {} bytes from {} to {}", n, args.key, local_path);
                }
                None => {
                    tokio::io::copy(&mut reader, &mut tokio::io::stdout()).await?;
                }
            }
        }
        op => {
            bail!("Unknown operation: {op}");
        }
    }

    Ok(())
}
