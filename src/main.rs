// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use ocr_crop_node::config::NodeConfig;
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    println!("🚀 Starting OCR Crop Node...\n");
    println!("📦 BUILD VERSION: {}", ocr_crop_node::version::VERSION);
    println!("📅 Build Date: {}", ocr_crop_node::version::BUILD_DATE);
    println!();

    // Load and validate configuration
    let config = NodeConfig::from_env();
    if let Err(e) = config.validate() {
        eprintln!("❌ Invalid configuration: {}", e);
        return Err(anyhow::anyhow!(e));
    }

    if config.vision.is_configured() {
        println!("👁️  OCR backend configured: {}", config.vision.endpoint.as_deref().unwrap_or_default());
    } else {
        println!("⚠️  VISION_ENDPOINT / VISION_API_KEY not set");
        println!("   /v1/process-image will return 500 until both are configured");
    }

    println!(
        "✂️  Landmark phrases: {} upper, {} lower",
        config.phrases.upper.len(),
        config.phrases.lower.len()
    );

    let api_port = config.api_port;
    let separator = "=".repeat(60);
    println!("\n{}", separator);
    println!("🎉 OCR Crop Node is running!");
    println!("{}", separator);
    println!("API Port:       {}", api_port);
    println!("\nAPI Endpoints:");
    println!("  Health:       http://localhost:{}/health", api_port);
    println!(
        "  Process:      POST http://localhost:{}/v1/process-image",
        api_port
    );
    println!("\nTest with curl:");
    println!(
        "  curl -X POST http://localhost:{}/v1/process-image \\",
        api_port
    );
    println!("    -H 'Content-Type: application/json' \\");
    println!("    -d '{{\"imageUrl\": \"https://example.com/chart.png\"}}'");
    println!("\nPress Ctrl+C to shutdown...");
    println!("{}\n", separator);

    ocr_crop_node::api::start_server(config)
        .await
        .map_err(|e| anyhow::anyhow!("API server failed: {}", e))?;

    Ok(())
}
