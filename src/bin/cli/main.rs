use anyhow::{Context, Result};
use bucket_relay::adapters::inbound::{
    http::{HealthDto, InvocationErrorDto, REQUEST_ID_HEADER},
    lambda::{InvocationResponse, object_created_event},
};
use clap::{Parser, Subcommand};
use reqwest::StatusCode;

#[derive(Parser, Debug)]
#[command(name = "bucket-relay-cli")]
#[command(about = "Invoke the bucket relay functions on a running server", long_about = None)]
struct Cli {
    /// Server URL
    #[arg(short, long, env = "BUCKET_RELAY_URL", default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that the server is up
    Health,

    /// Generate today's media report
    Report,

    /// Import a JSON object into the record table
    Import {
        /// Bucket holding the object
        #[arg(short, long)]
        bucket: String,
        /// Object key
        #[arg(short, long)]
        key: String,
    },

    /// Copy an object to the destination bucket
    Replicate {
        /// Bucket holding the object
        #[arg(short, long)]
        bucket: String,
        /// Object key
        #[arg(short, long)]
        key: String,
    },
}

fn invocation_url(base: &str, function: &str) -> String {
    format!(
        "{}/functions/{}/invocations",
        base.trim_end_matches('/'),
        function
    )
}

async fn invoke_with_event(
    client: &reqwest::Client,
    base: &str,
    function: &str,
    bucket: &str,
    key: &str,
) -> Result<()> {
    let response = client
        .post(invocation_url(base, function))
        .json(&object_created_event(bucket, key))
        .send()
        .await
        .with_context(|| format!("Failed to reach {}", base))?;

    let request_id = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    if response.status() == StatusCode::NO_CONTENT {
        println!("{} s3://{}/{} ok (request {})", function, bucket, key, request_id);
        return Ok(());
    }

    let status = response.status();
    let error: InvocationErrorDto = response
        .json()
        .await
        .with_context(|| format!("Unexpected response with status {}", status))?;
    anyhow::bail!(
        "{} failed ({}): {} (request {})",
        function,
        error.error_type,
        error.error_message,
        request_id
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match &cli.command {
        Commands::Health => {
            let health: HealthDto = client
                .get(format!("{}/health", cli.url.trim_end_matches('/')))
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;
            println!("{} (version {})", health.status, health.version);
        }
        Commands::Report => {
            let response: InvocationResponse = client
                .post(invocation_url(&cli.url, "report"))
                .json(&serde_json::json!({}))
                .send()
                .await
                .with_context(|| format!("Failed to reach {}", cli.url))?
                .error_for_status()?
                .json()
                .await?;

            println!("{}", response.body);
            if !response.is_success() {
                anyhow::bail!("report failed with status {}", response.status_code);
            }
        }
        Commands::Import { bucket, key } => {
            invoke_with_event(&client, &cli.url, "import", bucket, key).await?;
        }
        Commands::Replicate { bucket, key } => {
            invoke_with_event(&client, &cli.url, "replicate", bucket, key).await?;
        }
    }

    Ok(())
}
