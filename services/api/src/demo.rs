use crate::infra::{parse_completion, InMemorySnapshotRepository};
use clap::Args;
use positivation::analytics::{
    ClientId, CompletionFilter, FilterSpec, PositivationReport, PositivationService,
    RankingConfig, RawSnapshot, SnapshotLoadError, SnapshotLoader,
};
use positivation::config::AppConfig;
use positivation::error::AppError;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Snapshot JSON file holding `campaign` and `clients`
    #[arg(long)]
    pub(crate) snapshot: PathBuf,
    /// Restrict the view to one city (exact match)
    #[arg(long)]
    pub(crate) city: Option<String>,
    /// Industry to evaluate completion against; repeat for several
    #[arg(long = "industry")]
    pub(crate) industries: Vec<String>,
    /// Completion status filter: all, complete or incomplete
    #[arg(long, value_parser = parse_completion, default_value = "all")]
    pub(crate) completion: CompletionFilter,
    /// Case-insensitive client name search
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Size of both rankings (defaults to the configured values)
    #[arg(long)]
    pub(crate) top: Option<usize>,
    /// Print the full report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Size of both rankings in the demo output
    #[arg(long, default_value_t = 3)]
    pub(crate) top: usize,
    /// Print the campaign-wide report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        snapshot,
        city,
        industries,
        completion,
        search,
        top,
        json,
    } = args;

    let ranking = match top {
        Some(limit) => RankingConfig::uniform(limit),
        None => AppConfig::load()?.analytics.ranking(),
    };

    let snapshot = SnapshotLoader::from_path(snapshot)?;
    let mut filter = FilterSpec::default()
        .with_industries(industries)
        .with_completion(completion)
        .with_search(search.unwrap_or_default());
    if let Some(city) = city {
        filter = filter.with_city(city);
    }

    let report = PositivationReport::build(&snapshot, &filter, &ranking);
    if json {
        print_json(&report);
    } else {
        render_report(&report);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { top, json } = args;

    println!("Positivation analytics demo");
    let repository = Arc::new(InMemorySnapshotRepository::default());
    let service = PositivationService::new(repository, RankingConfig::uniform(top));

    let raw = sample_snapshot()?;
    let summary = service.publish(&raw)?;
    println!(
        "- Published campaign {} ({}) with {} industries / {} products",
        summary.id, summary.name, summary.industry_count, summary.product_count
    );

    let report = service.report(&summary.id, &FilterSpec::default())?;
    if json {
        print_json(&report);
        return Ok(());
    }
    render_report(&report);

    let pending = FilterSpec::default()
        .with_industries(["Bebidas", "Limpeza"])
        .with_completion(CompletionFilter::Incomplete);
    let pending_report = service.report(&summary.id, &pending)?;
    println!("\nClients still missing Bebidas or Limpeza products:");
    for card in &pending_report.scorecards {
        let missing: Vec<String> = card
            .missing_products
            .iter()
            .filter(|(_, products)| !products.is_empty())
            .map(|(industry, products)| format!("{}: {}", industry, products.join(", ")))
            .collect();
        println!("  - {} -> {}", card.name, missing.join(" | "));
    }

    let scorecard = service.scorecard(&summary.id, &ClientId("c-102".to_string()))?;
    match serde_json::to_string_pretty(&scorecard) {
        Ok(json) => println!("\nScorecard payload for {}:\n{}", scorecard.name, json),
        Err(err) => println!("\nScorecard payload unavailable: {}", err),
    }

    Ok(())
}

fn print_json(report: &PositivationReport) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{}", json),
        Err(err) => println!("Report payload unavailable: {}", err),
    }
}

pub(crate) fn render_report(report: &PositivationReport) {
    let campaign = &report.campaign;
    let overview = &report.overview;

    println!(
        "\nCampaign {} - {} [{}]",
        campaign.id, campaign.name, campaign.status_label
    );
    for warning in &report.warnings {
        println!("  ! {}", warning.message);
    }
    println!(
        "- {} clients | {} of {} product slots positivated ({:.1}%) | {} fully complete",
        overview.total_clients,
        overview.total_positivated,
        overview.total_positivated + overview.total_not_positivated,
        overview.positivation_rate,
        overview.fully_complete_clients
    );
    println!(
        "- Sold R$ {} against a goal of R$ {} ({:.1}%)",
        overview.total_value, overview.total_goal, overview.goal_percentage
    );

    println!("Industries:");
    for industry in &report.industries {
        println!(
            "  - {}: R$ {} / R$ {} ({:.1}%) | {} of {} clients positivated",
            industry.name,
            industry.total_value,
            industry.goal,
            industry.goal_percentage,
            industry.positivated_client_count,
            industry.total_client_count
        );
        for product in industry.products.values() {
            println!(
                "      {}: {} positivated, {} missing, R$ {}",
                product.product,
                product.positivated_count,
                product.missing_count,
                product.total_value
            );
        }
    }

    if !report.top_clients.is_empty() {
        println!("Top clients:");
        for entry in &report.top_clients {
            println!(
                "  {}. {} ({}) R$ {} | {:.0}% complete",
                entry.rank, entry.name, entry.city, entry.total_value, entry.percentage
            );
        }
    }

    if !report.top_products.is_empty() {
        println!("Top products:");
        for entry in &report.top_products {
            println!(
                "  {}. {} / {}: {} clients, R$ {}",
                entry.rank,
                entry.industry,
                entry.product,
                entry.positivated_count,
                entry.total_value
            );
        }
    }

    if !report.cities.is_empty() {
        println!("Cities:");
        for city in &report.cities {
            println!(
                "  - {}: {} clients, {} products positivated, R$ {}",
                city.city, city.client_count, city.positivated_count, city.total_value
            );
        }
    }
}

fn sample_snapshot() -> Result<RawSnapshot, AppError> {
    decode_sample(demo_snapshot())
}

fn decode_sample(value: serde_json::Value) -> Result<RawSnapshot, AppError> {
    serde_json::from_value(value).map_err(|err| AppError::from(SnapshotLoadError::from(err)))
}

fn demo_snapshot() -> serde_json::Value {
    json!({
        "campaign": {
            "id": "verao-2025",
            "name": "Campanha Verão 2025",
            "status": "ativa",
            "startDate": "2025-01-06",
            "endDate": "2025-03-28",
            "industries": {
                "Bebidas": { "targetValue": 5000, "Skol": {}, "Brahma": {}, "Guaraná": {} },
                "Limpeza": { "targetValue": 2000, "Omo": {}, "Ypê": {} },
                "Mercearia": ["Arroz", "Feijão"]
            }
        },
        "clients": [
            {
                "id": "c-101",
                "CLIENTE": "Bar do Zé",
                "CIDADE": "Campinas",
                "industries": {
                    "Bebidas": {
                        "products": {
                            "Skol": { "positivated": true, "value": 820.5 },
                            "Brahma": { "positivated": true, "value": 410 },
                            "Guaraná": { "positivated": true, "value": 150 }
                        }
                    },
                    "Limpeza": { "Omo": { "status": "positivado", "valor": "95,90" } }
                }
            },
            {
                "id": "c-102",
                "CLIENTE": "Mercado Central",
                "CIDADE": "Campinas",
                "industries": {
                    "Bebidas": { "Skol": { "positivado": true, "valor": 1200 } },
                    "Limpeza": { "Omo": true, "Ypê": { "positivado": true, "valor": 340 } },
                    "Mercearia": { "Arroz": { "positivado": true, "valor": 600 } }
                }
            },
            {
                "id": "c-103",
                "CLIENTE": "Padaria Sol",
                "CIDADE": "Sorocaba",
                "industries": {
                    "Bebidas": { "Brahma": { "positivado": false, "valor": 300 } }
                }
            },
            {
                "id": 104,
                "CLIENTE": "Empório Lua",
                "CIDADE": " Sorocaba ",
                "industries": {
                    "Bebidas": {
                        "Skol": { "positivado": true, "valor": 540 },
                        "Brahma": { "positivado": true, "valor": 380 },
                        "Guaraná": { "positivado": true, "valor": 120 }
                    },
                    "Limpeza": {
                        "Omo": { "positivado": true, "valor": 210 },
                        "Ypê": { "positivado": true, "valor": 160 }
                    },
                    "Mercearia": {
                        "Arroz": { "positivado": true, "valor": 450 },
                        "Feijão": { "positivado": true, "valor": 390 }
                    }
                }
            }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use positivation::analytics::normalize;

    #[test]
    fn demo_snapshot_normalizes() {
        let raw: RawSnapshot = serde_json::from_value(demo_snapshot()).expect("sample decodes");
        let snapshot = normalize(&raw).expect("sample is valid");

        assert_eq!(snapshot.campaign.industries.len(), 3);
        assert_eq!(snapshot.clients.len(), 4);
        assert_eq!(snapshot.clients[3].id.0, "104");
        assert_eq!(snapshot.clients[3].city, "Sorocaba");

        let report =
            PositivationReport::build(&snapshot, &FilterSpec::default(), &RankingConfig::default());
        assert_eq!(report.overview.fully_complete_clients, 1);
        assert_eq!(report.cities.len(), 2);
    }

    #[test]
    fn undecodable_sample_is_an_error() {
        let error = decode_sample(json!({ "campaign": { "id": "x" }, "clients": "none" }))
            .expect_err("clients must be a list");

        assert!(matches!(error, AppError::Snapshot(SnapshotLoadError::Json(_))));
    }

    #[test]
    fn run_demo_completes() {
        run_demo(DemoArgs::default()).expect("demo runs");
    }
}
