use lindle_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("lindle error: {err}");
        std::process::exit(1);
    }
}
