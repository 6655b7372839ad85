#[actix_web::main]
async fn main() {
    if let Err(err) = csv_insight::run().await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
