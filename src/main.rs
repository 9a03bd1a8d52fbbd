#[tokio::main]
async fn main() {
    devconnector::web::run().await;
}
