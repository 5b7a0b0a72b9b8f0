//! Floorboard operator CLI: floor and room CRUD plus plan-image upload over
//! the store's REST API.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("could not read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("server returned HTTP {status} for {path}: {message}")]
    ServerError {
        status: u16,
        path: String,
        message: String,
    },
}

#[derive(Parser, Debug)]
#[command(name = "floorboard-cli", about = "Floorboard floor/room store CLI")]
struct Cli {
    #[arg(long, env = "FLOORBOARD_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the server is up.
    Ping,
    /// Print the full plan snapshot (all floors with their rooms).
    Plan,
    Floor(FloorCommand),
    Room(RoomCommand),
    /// Upload a plan image and print the URL to create a floor with.
    UploadImage {
        /// Path to the image file.
        path: PathBuf,
        /// Filename to store under; defaults to the file's own name.
        #[arg(long)]
        filename: Option<String>,
    },
}

#[derive(Args, Debug)]
struct FloorCommand {
    #[command(subcommand)]
    command: FloorSubcommand,
}

#[derive(Subcommand, Debug)]
enum FloorSubcommand {
    List,
    Create {
        #[arg(long)]
        number: i32,
        /// URL returned by `upload-image`.
        #[arg(long)]
        image_url: String,
    },
    /// Delete a floor and every room on it.
    Delete {
        floor_id: Uuid,
    },
    /// Copy a floor and its rooms under a new number.
    Duplicate {
        floor_id: Uuid,
        #[arg(long)]
        new_number: i32,
    },
}

#[derive(Args, Debug)]
struct RoomCommand {
    #[command(subcommand)]
    command: RoomSubcommand,
}

#[derive(Subcommand, Debug)]
enum RoomSubcommand {
    List {
        #[arg(long)]
        floor_id: Option<Uuid>,
    },
    /// Create a room from a JSON body (see the store's create-room schema).
    Create {
        /// Inline JSON, e.g. '{"floor_id":"...","room_number":"204",...}'.
        #[arg(long)]
        data: String,
    },
    /// Sparse-update a room from a JSON body.
    Update {
        room_id: Uuid,
        #[arg(long)]
        data: String,
    },
    Delete {
        room_id: Uuid,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let ctx = Context { base_url: cli.base_url };

    match cli.command {
        Command::Ping => run_ping(&ctx).await,
        Command::Plan => print_json(&request(&ctx, reqwest::Method::GET, "/api/plan", None).await?),
        Command::Floor(floor) => run_floor(&ctx, floor).await,
        Command::Room(room) => run_room(&ctx, room).await,
        Command::UploadImage { path, filename } => run_upload(&ctx, path, filename).await,
    }
}

#[derive(Debug, Clone)]
struct Context {
    base_url: String,
}

async fn run_ping(ctx: &Context) -> Result<(), CliError> {
    let url = format!("{}/healthz", ctx.base_url.trim_end_matches('/'));
    let response = reqwest::Client::new().get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::ServerError {
            status: status.as_u16(),
            path: "/healthz".to_string(),
            message: "health check failed".to_string(),
        });
    }
    println!("ok");
    Ok(())
}

async fn run_floor(ctx: &Context, floor: FloorCommand) -> Result<(), CliError> {
    let json = match floor.command {
        FloorSubcommand::List => request(ctx, reqwest::Method::GET, "/api/floors", None).await?,
        FloorSubcommand::Create { number, image_url } => {
            let body = serde_json::json!({ "floor_number": number, "plan_image_url": image_url });
            request(ctx, reqwest::Method::POST, "/api/floors", Some(body)).await?
        }
        FloorSubcommand::Delete { floor_id } => {
            let path = format!("/api/floors/{floor_id}");
            request(ctx, reqwest::Method::DELETE, &path, None).await?
        }
        FloorSubcommand::Duplicate { floor_id, new_number } => {
            let path = format!("/api/floors/{floor_id}/duplicate");
            let body = serde_json::json!({ "new_floor_number": new_number });
            request(ctx, reqwest::Method::POST, &path, Some(body)).await?
        }
    };
    print_json(&json)
}

async fn run_room(ctx: &Context, room: RoomCommand) -> Result<(), CliError> {
    let json = match room.command {
        RoomSubcommand::List { floor_id } => {
            let path = match floor_id {
                Some(id) => format!("/api/rooms?floor_id={id}"),
                None => "/api/rooms".to_string(),
            };
            request(ctx, reqwest::Method::GET, &path, None).await?
        }
        RoomSubcommand::Create { data } => {
            let body: Value = serde_json::from_str(&data)?;
            request(ctx, reqwest::Method::POST, "/api/rooms", Some(body)).await?
        }
        RoomSubcommand::Update { room_id, data } => {
            let body: Value = serde_json::from_str(&data)?;
            let path = format!("/api/rooms/{room_id}");
            request(ctx, reqwest::Method::PATCH, &path, Some(body)).await?
        }
        RoomSubcommand::Delete { room_id } => {
            let path = format!("/api/rooms/{room_id}");
            request(ctx, reqwest::Method::DELETE, &path, None).await?
        }
    };
    print_json(&json)
}

async fn run_upload(ctx: &Context, path: PathBuf, filename: Option<String>) -> Result<(), CliError> {
    let bytes = std::fs::read(&path).map_err(|source| CliError::ReadFile { path: path.clone(), source })?;
    let name = filename.unwrap_or_else(|| {
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "plan.png".to_string())
    });

    let url = format!(
        "{}/api/images?filename={}",
        ctx.base_url.trim_end_matches('/'),
        name
    );
    let response = reqwest::Client::new().post(url).body(bytes).send().await?;
    let json = into_json(response, "/api/images").await?;
    print_json(&json)
}

async fn request(
    ctx: &Context,
    method: reqwest::Method,
    path: &str,
    body: Option<Value>,
) -> Result<Value, CliError> {
    let url = format!("{}{}", ctx.base_url.trim_end_matches('/'), path);
    let request = reqwest::Client::new().request(method, url);
    let request = match body {
        Some(json) => request.json(&json),
        None => request,
    };
    let response = request.send().await?;
    into_json(response, path).await
}

async fn into_json(response: reqwest::Response, path: &str) -> Result<Value, CliError> {
    let status = response.status();
    let value = response.json::<Value>().await.unwrap_or(Value::Null);

    if !status.is_success() {
        return Err(CliError::ServerError {
            status: status.as_u16(),
            path: path.to_string(),
            message: value.to_string(),
        });
    }
    Ok(value)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn floor_create_parses_flags() {
        let cli = Cli::try_parse_from([
            "floorboard-cli",
            "floor",
            "create",
            "--number",
            "3",
            "--image-url",
            "/uploads/plan.png",
        ])
        .unwrap();
        let Command::Floor(floor) = cli.command else {
            panic!("expected floor command");
        };
        let FloorSubcommand::Create { number, image_url } = floor.command else {
            panic!("expected create");
        };
        assert_eq!(number, 3);
        assert_eq!(image_url, "/uploads/plan.png");
    }

    #[test]
    fn room_list_accepts_optional_floor() {
        let cli = Cli::try_parse_from(["floorboard-cli", "room", "list"]).unwrap();
        let Command::Room(room) = cli.command else {
            panic!("expected room command");
        };
        assert!(matches!(room.command, RoomSubcommand::List { floor_id: None }));
    }

    #[test]
    fn base_url_has_a_default() {
        let cli = Cli::try_parse_from(["floorboard-cli", "ping"]).unwrap();
        assert_eq!(cli.base_url, "http://127.0.0.1:3000");
    }
}
