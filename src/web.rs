use std::path::PathBuf;
use std::sync::Mutex;

use actix_files::Files;
use actix_web::{middleware, web, App, HttpResponse, HttpServer, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::board::{sites, AccessController, AccessMode, Board, Role, SECTIONS};
use crate::directory::PhoneDirectory;
use crate::error::Error;
use crate::export::{encode_board, export_file_name};

/// In-memory storage for the day's board plus the durable phone directory.
pub struct AppState {
    pub board: Mutex<Board>,
    pub directory: Mutex<PhoneDirectory>,
    pub access: AccessController,
    pub directory_path: PathBuf,
}

#[derive(Deserialize)]
pub struct PasswordRequest {
    password: String,
}

#[derive(Deserialize)]
pub struct PlaceRequest {
    name: String,
    site: usize,
    role: Role,
}

#[derive(Deserialize)]
pub struct CellRequest {
    site: usize,
    role: Role,
}

#[derive(Deserialize)]
pub struct BreakRequest {
    site: usize,
    break_index: usize,
}

#[derive(Deserialize)]
pub struct RosterAddRequest {
    role: Role,
    names: String,
}

#[derive(Deserialize)]
pub struct RosterRemoveRequest {
    role: Role,
    name: String,
}

#[derive(Deserialize)]
pub struct RosterClearRequest {
    role: Role,
}

#[derive(Deserialize)]
pub struct PhoneImportRequest {
    text: String,
}

#[derive(Deserialize)]
pub struct NotifyRequest {
    name: String,
    site: usize,
}

#[derive(Serialize)]
struct SiteRow {
    index: usize,
    site: &'static str,
    anesthesiologist: Option<String>,
    ahp: Option<String>,
    relief: Option<String>,
    breaks: [bool; 2],
}

#[derive(Serialize)]
struct SectionView {
    title: &'static str,
    rows: Vec<SiteRow>,
}

#[derive(Serialize)]
struct BoardResponse {
    date: String,
    mode: AccessMode,
    sections: Vec<SectionView>,
    anesthesiologists: Vec<String>,
    ahps: Vec<String>,
    relief: Vec<String>,
    assigned: Vec<String>,
}

/// Maps a board error to the matching HTTP response. Every failure leaves
/// state unchanged, so the body carries the message and nothing else.
fn error_response(err: &Error) -> HttpResponse {
    let body = serde_json::json!({"success": false, "error": err.to_string()});
    match err {
        Error::ViewOnly => HttpResponse::Forbidden().json(body),
        Error::UnknownSite(_) | Error::InvalidBreakIndex(_) => HttpResponse::BadRequest().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

// Full board snapshot for rendering
async fn board_state(state: web::Data<AppState>) -> Result<HttpResponse> {
    let board = state.board.lock().unwrap();

    let mut sections = Vec::with_capacity(SECTIONS.len());
    let mut index = 0;
    for section in SECTIONS {
        let mut rows = Vec::with_capacity(section.sites.len());
        for &site in section.sites {
            rows.push(SiteRow {
                index,
                site,
                anesthesiologist: board
                    .assignments
                    .get(index, Role::Anesthesiologist)
                    .map(str::to_string),
                ahp: board.assignments.get(index, Role::Ahp).map(str::to_string),
                relief: board.assignments.get(index, Role::Relief).map(str::to_string),
                breaks: board.breaks.flags(index),
            });
            index += 1;
        }
        sections.push(SectionView {
            title: section.title,
            rows,
        });
    }

    let mut assigned: Vec<String> = board.assigned_names().into_iter().collect();
    assigned.sort();

    Ok(HttpResponse::Ok().json(BoardResponse {
        date: Local::now().format("%A, %B %-d, %Y").to_string(),
        mode: board.mode(),
        sections,
        anesthesiologists: board.roster.names(Role::Anesthesiologist).to_vec(),
        ahps: board.roster.names(Role::Ahp).to_vec(),
        relief: board.roster.names(Role::Relief).to_vec(),
        assigned,
    }))
}

// Drag-release: place a staff name into a cell
async fn assign(req: web::Json<PlaceRequest>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let name = req.name.trim();
    if name.is_empty() {
        return Ok(HttpResponse::BadRequest()
            .json(serde_json::json!({"success": false, "error": "Staff name is required"})));
    }

    let mut board = state.board.lock().unwrap();
    match board.place(name, req.site, req.role) {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({"success": true}))),
        Err(err) => Ok(error_response(&err)),
    }
}

async fn unassign(req: web::Json<CellRequest>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let mut board = state.board.lock().unwrap();
    match board.remove(req.site, req.role) {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({"success": true}))),
        Err(err) => Ok(error_response(&err)),
    }
}

// Break toggling stays available in view mode
async fn toggle_break(
    req: web::Json<BreakRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let mut board = state.board.lock().unwrap();
    match board.toggle_break(req.site, req.break_index) {
        Ok(taken) => {
            Ok(HttpResponse::Ok().json(serde_json::json!({"success": true, "taken": taken})))
        }
        Err(err) => Ok(error_response(&err)),
    }
}

async fn roster_add(
    req: web::Json<RosterAddRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let mut board = state.board.lock().unwrap();
    match board.add_staff(req.role, &req.names) {
        Ok(added) => {
            Ok(HttpResponse::Ok().json(serde_json::json!({"success": true, "added": added})))
        }
        Err(err) => Ok(error_response(&err)),
    }
}

async fn roster_remove(
    req: web::Json<RosterRemoveRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let mut board = state.board.lock().unwrap();
    match board.remove_staff(req.role, &req.name) {
        Ok(removed) => {
            Ok(HttpResponse::Ok().json(serde_json::json!({"success": true, "removed": removed})))
        }
        Err(err) => Ok(error_response(&err)),
    }
}

async fn roster_clear(
    req: web::Json<RosterClearRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let mut board = state.board.lock().unwrap();
    match board.clear_staff(req.role) {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({"success": true}))),
        Err(err) => Ok(error_response(&err)),
    }
}

// Edit -> View needs no confirmation
async fn enter_view(state: web::Data<AppState>) -> Result<HttpResponse> {
    let mut board = state.board.lock().unwrap();
    board.enter_view();
    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
}

// View -> Edit requires the passphrase
async fn login(req: web::Json<PasswordRequest>, state: web::Data<AppState>) -> Result<HttpResponse> {
    if state.access.verify(&req.password) {
        let mut board = state.board.lock().unwrap();
        board.enter_edit();
        Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
    } else {
        Ok(HttpResponse::Unauthorized().json(
            serde_json::json!({"success": false, "error": "Incorrect password. Please try again."}),
        ))
    }
}

// Clear board, breaks and rosters as one action, gated by the passphrase
async fn clear_board(
    req: web::Json<PasswordRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if !state.access.verify(&req.password) {
        return Ok(HttpResponse::Unauthorized().json(
            serde_json::json!({"success": false, "error": "Incorrect password. Please try again."}),
        ));
    }

    let mut board = state.board.lock().unwrap();
    board.clear_all();
    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
}

async fn phones(state: web::Data<AppState>) -> Result<HttpResponse> {
    let directory = state.directory.lock().unwrap();
    let entries: std::collections::BTreeMap<&str, &str> = directory.iter().collect();
    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true, "entries": entries})))
}

async fn phones_import(
    req: web::Json<PhoneImportRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let mut directory = state.directory.lock().unwrap();
    let imported = directory.bulk_import(&req.text);

    if imported == 0 {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": "Could not parse any phone numbers. Please use 'Name, Phone' format."
        })));
    }

    // Best-effort flush; the in-memory directory stays authoritative
    if let Err(err) = directory.save(&state.directory_path) {
        warn!("failed to persist phone directory: {err}");
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true, "imported": imported})))
}

// SMS stub: reports what would be sent, no transport behind it
async fn notify(req: web::Json<NotifyRequest>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let site = match sites::site_label(req.site) {
        Some(site) => site,
        None => return Ok(error_response(&Error::UnknownSite(req.site))),
    };

    let directory = state.directory.lock().unwrap();
    match directory.phone(&req.name) {
        Some(phone) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": format!(
                "Sending SMS to {} ({}): \"You are assigned to {}\"",
                req.name, phone, site
            )
        }))),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "success": false,
            "error": format!(
                "No phone number found for {}. Please update the phone directory.",
                req.name
            )
        }))),
    }
}

// CSV download, available in both modes
async fn export(state: web::Data<AppState>) -> Result<HttpResponse> {
    let board = state.board.lock().unwrap();
    match encode_board(&board.assignments, &board.breaks) {
        Ok(csv) => {
            let filename = export_file_name(Local::now().date_naive());
            Ok(HttpResponse::Ok()
                .content_type("text/csv")
                .insert_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{}\"", filename),
                ))
                .body(csv))
        }
        Err(err) => Ok(error_response(&err)),
    }
}

async fn index() -> Result<HttpResponse> {
    let html = include_str!("../templates/index.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

pub async fn start_server(
    port: u16,
    passphrase: String,
    directory_path: PathBuf,
) -> std::io::Result<()> {
    let directory = PhoneDirectory::load(&directory_path);
    let app_state = web::Data::new(AppState {
        board: Mutex::new(Board::default()),
        directory: Mutex::new(directory),
        access: AccessController::new(passphrase),
        directory_path,
    });

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .service(Files::new("/static", "static"))
            .route("/", web::get().to(index))
            .route("/api/board", web::get().to(board_state))
            .route("/api/assign", web::post().to(assign))
            .route("/api/unassign", web::post().to(unassign))
            .route("/api/break", web::post().to(toggle_break))
            .route("/api/roster/add", web::post().to(roster_add))
            .route("/api/roster/remove", web::post().to(roster_remove))
            .route("/api/roster/clear", web::post().to(roster_clear))
            .route("/api/view", web::post().to(enter_view))
            .route("/api/login", web::post().to(login))
            .route("/api/clear", web::post().to(clear_board))
            .route("/api/phones", web::get().to(phones))
            .route("/api/phones/import", web::post().to(phones_import))
            .route("/api/notify", web::post().to(notify))
            .route("/api/export", web::get().to(export))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
