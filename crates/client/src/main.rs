use anyhow::{Context, Result, bail};

use dispatch_client::DispatchClient;
use dispatch_core::{DistributionId, OrderId};
use dispatch_orders::dispatch::SeizeEligibility;
use dispatch_orders::paging::PageRequest;
use dispatch_orders::query::OrderQuery;
use dispatch_orders::state::StateBucket;

const USAGE: &str = "usage: dispatch-cli <orders [in-transit|completed|returned] [page] | order <id> | hall [page] | seize <distribution-id> | grab-times | service>";

#[tokio::main]
async fn main() -> Result<()> {
    dispatch_observability::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let client = DispatchClient::from_env().context("reading client configuration")?;

    match args.first().map(String::as_str) {
        Some("orders") => {
            let mut query = OrderQuery::new(PageRequest::default());
            for arg in &args[1..] {
                match arg.as_str() {
                    "in-transit" => query = query.bucket(StateBucket::InTransit),
                    "completed" => query = query.bucket(StateBucket::Completed),
                    "returned" => query = query.bucket(StateBucket::Returned),
                    page => query.page = page.parse().with_context(|| format!("bad page {page:?}"))?,
                }
            }
            let page = client.list_orders(&query).await?.into_result()?;
            println!(
                "page {}/{} ({} orders, {} in transit, {} abnormal)",
                page.data.page,
                page.data.total_pages(),
                page.data.total,
                page.in_transit_count,
                page.abnormal_count
            );
            for order in &page.data.items {
                println!("{}\t{}\t{:.2}", order.order_number, order.state_label(), order.dividend_amount);
            }
        }
        Some("order") => {
            let id: OrderId = arg(&args, 1)?.parse()?;
            let detail = client.order_detail(id).await?.into_result()?;
            println!("{}", serde_json::to_string_pretty(&detail)?);
        }
        Some("hall") => {
            let page_no = match args.get(1) {
                Some(raw) => raw.parse().with_context(|| format!("bad page {raw:?}"))?,
                None => 1,
            };
            let query = dispatch_orders::dispatch::HallQuery::new(PageRequest::new(page_no, 10)?);
            let page = client.hall(&query).await?.into_result()?;
            for order in &page.items {
                println!(
                    "{}\t{}\t{:.2}",
                    order.id,
                    order.order_type_name.as_deref().unwrap_or("-"),
                    order.task_amount
                );
            }
        }
        Some("seize") => {
            let id: DistributionId = arg(&args, 1)?.parse()?;
            match client.seize_eligibility(id).await? {
                SeizeEligibility::Eligible => {
                    let receipt = client.seize(id).await?.into_result()?;
                    println!("{}", receipt.as_str());
                }
                SeizeEligibility::AlreadyTaken => bail!("order {id} was already taken"),
                SeizeEligibility::NotEligible { code, message } => {
                    bail!("not eligible to seize order {id} ({code}): {message}")
                }
            }
        }
        Some("grab-times") => {
            for entry in client.grab_times().await?.into_optional()?.unwrap_or_default() {
                println!("{}\t{}", entry.week, entry.time);
            }
        }
        Some("service") => {
            let points = client.service_points().await?.into_result()?;
            println!("service points {:.1}", points.service_points);
            for score in points.breakdown() {
                println!("{}\t{:.2}\t{:.1}", score.metric.label(), score.value, score.points);
            }
        }
        _ => bail!(USAGE),
    }
    Ok(())
}

fn arg(args: &[String], index: usize) -> Result<&str> {
    args.get(index).map(String::as_str).context(USAGE)
}
