#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    scholar_orbit::citations::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    scholar_orbit::frontend::run();
}
