use scot_client::http_handler::http_request::{
    execute::{TaskDownloadRequest, TaskStatusRequest},
    knowledge::{KnowledgeGetRequest, KnowledgeListRequest},
    logs::{LogDetailRequest, LogsListRequest},
    prd::{PrdDownloadRequest, PrdGetRequest, PrdListRequest},
    upload::UploadListRequest,
};
use scot_client::{
    ApiPayload, ClientConfig, HTTPClient, HTTPError, HTTPRequestType, NoBodyHTTPRequestType, error,
    info,
};
use std::fmt::Write as _;
use std::{env, process::ExitCode};

const USAGE: &str = "\
usage: scot-client <command> [args]

commands:
  prds                          list stored PRDs
  prd <id>                      show one PRD
  knowledge                     list stored knowledge graphs
  knowledge-graph <id>          show the nodes of one knowledge graph
  logs                          list executed tasks
  log <task_id>                 show one task log entry
  status <task_id>              show the execution status of a task
  uploads                       list uploaded files
  download-prd <id> <out>       store a PRD document in <out>
  download-task <task_id> <out> store the generated site archive in <out>
  get <path>                    raw GET, printed as returned

environment: SCOT_BASE_URL, SCOT_API_ROOT, SCOT_TIMEOUT_SECS, LOG_SCOT_REQUESTS";

#[cfg(test)]
#[path = "../tests/common/mod.rs"]
mod common;

#[derive(Debug)]
enum CliError {
    Usage,
    Http(HTTPError),
}

impl From<HTTPError> for CliError {
    fn from(value: HTTPError) -> Self { CliError::Http(value) }
}

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let client = match ClientConfig::from_env()
        .map_err(HTTPError::from)
        .and_then(HTTPClient::new)
    {
        Ok(client) => client,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, &args).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(CliError::Usage) => {
            eprintln!("{USAGE}");
            ExitCode::from(2)
        }
        Err(CliError::Http(err)) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &HTTPClient, args: &[String]) -> Result<String, CliError> {
    let arg = |i: usize| args.get(i).cloned().ok_or(CliError::Usage);
    let mut out = String::new();
    match args.first().map(String::as_str) {
        Some("prds") => {
            let prds = (PrdListRequest {}).send_request(client).await?;
            for prd in prds.newest_first() {
                let _ = writeln!(out, "{}  {}  {}", prd.id, prd.created_at, prd.title);
            }
        }
        Some("prd") => {
            let prd = PrdGetRequest { id: arg(1)? }.send_request(client).await?;
            let _ = write!(out, "# {}\n\n{}", prd.title, prd.content);
        }
        Some("knowledge") => {
            let list = (KnowledgeListRequest {}).send_request(client).await?;
            for graph in list.knowledge_graphs {
                let _ = writeln!(out, "{}  {}  {}", graph.id, graph.created_at, graph.name);
            }
        }
        Some("knowledge-graph") => {
            let record = KnowledgeGetRequest { id: arg(1)? }.send_request(client).await?;
            let _ = writeln!(out, "{} ({} nodes)", record.name, record.graph.nodes.len());
            for node in record.graph.nodes {
                let category = node.data.category.unwrap_or_default();
                let _ = writeln!(out, "  {:<24} {:<16} {}", node.data.id, category, node.data.label);
            }
        }
        Some("logs") => {
            let logs = (LogsListRequest {}).send_request(client).await?;
            for entry in logs.logs {
                let _ = writeln!(out, "{}  {:<8} {}", entry.task_id, entry.status, entry.timestamp);
            }
        }
        Some("log") => {
            let entry = LogDetailRequest { task_id: arg(1)? }.send_request(client).await?;
            let _ = write!(
                out,
                "{} {} at {}\nfiles: {}",
                entry.task_id,
                entry.status,
                entry.timestamp,
                entry.files.join(", ")
            );
        }
        Some("status") => {
            let status = TaskStatusRequest { task_id: arg(1)? }.send_request(client).await?;
            let _ = write!(out, "{}: {} ({})", status.task_id, status.status, status.message);
        }
        Some("uploads") => {
            let uploads = (UploadListRequest {}).send_request(client).await?;
            for file in uploads.files {
                let _ = writeln!(out, "{:>10}  {}  {}", file.size, file.modified, file.filename);
            }
        }
        Some("download-prd") => {
            let request = PrdDownloadRequest { id: arg(1)? };
            let target = arg(2)?;
            let written = client.download_to_file(&request.endpoint(), &target).await?;
            info!("Stored PRD {} ({written} bytes)", request.id);
            let _ = write!(out, "{target}");
        }
        Some("download-task") => {
            let request = TaskDownloadRequest { task_id: arg(1)? };
            let target = arg(2)?;
            let written = client.download_to_file(&request.endpoint(), &target).await?;
            info!("Stored files of task {} ({written} bytes)", request.task_id);
            let _ = write!(out, "{target}");
        }
        Some("get") => match client.get(&arg(1)?).await? {
            ApiPayload::Json(value) => {
                let _ = write!(out, "{value:#}");
            }
            ApiPayload::Text(text) => out = text,
        },
        _ => return Err(CliError::Usage),
    }
    Ok(out.trim_end().to_owned())
}
