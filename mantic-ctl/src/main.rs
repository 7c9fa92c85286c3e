use anyhow::Context;

#[derive(structopt::StructOpt)]
struct Opt {
    #[structopt(short, long)]
    host: String,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(structopt::StructOpt)]
enum Command {
    /// Fetch a market with its full bet and comment lists
    GetMarket {
        /// Market slug
        slug: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opt = <Opt as structopt::StructOpt>::from_args();

    let client = reqwest::Client::new();

    match opt.cmd {
        Command::GetMarket { slug } => {
            let market: serde_json::Value = client
                .get(format!("{}/api/v0/slug/{}", opt.host, slug))
                .send()
                .await?
                .error_for_status()?
                .json()
                .await
                .context("decoding market response")?;
            println!(
                "{}",
                serde_json::to_string_pretty(&market).context("formatting market response")?
            );
        }
    }

    Ok(())
}
