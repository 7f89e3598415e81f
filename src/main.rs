// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use opinion_scraper::application::use_cases::run_scraper::RunScraperUseCase;
use opinion_scraper::config::settings::Settings;
use opinion_scraper::domain::models::PipelineResult;
use opinion_scraper::utils::telemetry;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 日志格式由配置决定，所以先加载配置
    let settings = Settings::new()?;
    telemetry::init_telemetry(settings.output.json_logs);
    info!("Starting opinion-scraper...");
    info!(listing = %settings.scraper.listing_url, engine = ?settings.browser.engine, "Configuration loaded");

    let result = RunScraperUseCase::new(settings).execute().await?;
    print_report(&result);

    info!("Scraping completed");
    Ok(())
}

fn print_report(result: &PipelineResult) {
    if result.is_empty() {
        println!("No articles found.");
        return;
    }

    println!("=== Articles ===");
    for (index, article) in result.articles.iter().enumerate() {
        println!("{}. {}", index + 1, article.title);
        println!("   {}", article.url);
        if let Some(image) = &article.image_url {
            println!("   image: {image}");
        }
    }

    println!();
    println!("=== Translated titles ===");
    for (index, title) in result.translated_titles.iter().enumerate() {
        println!("{}. {}", index + 1, title);
    }

    println!();
    println!("=== Repeated words ===");
    if result.repeated_words.is_empty() {
        println!("No words repeated more than twice");
    } else {
        for (word, count) in result.repeated_words.sorted_by_count() {
            println!("'{word}' - {count} times");
        }
    }
}
