use actix_cors::Cors;
use actix_multipart::Multipart;
use actix_web::{App, HttpResponse, HttpServer, Responder, web};
use futures_util::stream::StreamExt;
use serde_json::json;
use std::sync::Arc;

use crate::asistencia::{etiqueta_dia, marcado_habilitado};
use crate::colaboradores::{RepositorioSesiones, ServidorOferta};
use crate::importar::{PLANTILLA_CSV, confirmar_oferta, validar_oferta};
use crate::models::{EstadoMarcado, MarcaAsistencia, VistaPrevia};

/// Colaboradores que el servidor necesita; se inyectan desde `main` para
/// poder sustituirlos por implementaciones en memoria en los tests.
#[derive(Clone)]
pub struct Estado {
    pub servidor: Arc<dyn ServidorOferta>,
    pub sesiones: Arc<dyn RepositorioSesiones>,
}

/// Archivo subido vía multipart: nombre original y bytes completos.
struct ArchivoSubido {
    nombre: String,
    datos: Vec<u8>,
}

/// Lee el formulario multipart de los endpoints de oferta: un campo `archivo`
/// con el archivo y un campo `gestion` con el identificador del período.
async fn leer_formulario_oferta(mut payload: Multipart) -> (Option<ArchivoSubido>, Option<String>) {
    let mut archivo: Option<ArchivoSubido> = None;
    let mut gestion: Option<String> = None;

    while let Some(field_res) = payload.next().await {
        let mut field = match field_res {
            Ok(f) => f,
            Err(e) => {
                eprintln!("error en campo multipart: {}", e);
                continue;
            }
        };

        let nombre_campo = field
            .content_disposition()
            .get_name()
            .unwrap_or("")
            .to_string();

        let mut datos: Vec<u8> = Vec::new();
        while let Some(chunk) = field.next().await {
            match chunk {
                Ok(bytes) => datos.extend_from_slice(&bytes),
                Err(e) => {
                    eprintln!("error leyendo multipart: {}", e);
                    break;
                }
            }
        }

        match nombre_campo.as_str() {
            "archivo" => {
                let nombre = field
                    .content_disposition()
                    .get_filename()
                    .unwrap_or("oferta.csv")
                    .to_string();
                archivo = Some(ArchivoSubido { nombre, datos });
            }
            "gestion" => {
                let texto = String::from_utf8_lossy(&datos).trim().to_string();
                if !texto.is_empty() {
                    gestion = Some(texto);
                }
            }
            _ => {}
        }
    }

    (archivo, gestion)
}

fn es_texto_csv(nombre: &str) -> bool {
    let bajo = nombre.to_lowercase();
    bajo.ends_with(".csv") || bajo.ends_with(".txt")
}

/// Produce la vista previa de un archivo subido: CSV/texto se valida
/// localmente; otros formatos (planillas) se delegan al colaborador.
fn vista_previa(
    archivo: &ArchivoSubido,
    gestion: &str,
    servidor: &dyn ServidorOferta,
) -> Result<VistaPrevia, Box<dyn std::error::Error>> {
    if es_texto_csv(&archivo.nombre) {
        let texto = std::str::from_utf8(&archivo.datos)
            .map_err(|_| format!("el archivo '{}' no es texto UTF-8", archivo.nombre))?;
        validar_oferta(texto)
    } else {
        servidor.preview(&archivo.datos, gestion)
    }
}

/// POST /oferta/preview
/// Valida el archivo contra el esquema fijo y devuelve filas + resumen sin
/// persistir nada. Falta de archivo o de gestión bloquea la operación.
async fn oferta_preview_handler(payload: Multipart, data: web::Data<Estado>) -> impl Responder {
    let (archivo, gestion) = leer_formulario_oferta(payload).await;
    let archivo = match archivo {
        Some(a) => a,
        None => return HttpResponse::BadRequest().json(json!({"error": "debe adjuntar un archivo de oferta"})),
    };
    let gestion = match gestion {
        Some(g) => g,
        None => return HttpResponse::BadRequest().json(json!({"error": "debe seleccionar una gestión"})),
    };

    match vista_previa(&archivo, &gestion, data.servidor.as_ref()) {
        Ok(previa) => HttpResponse::Ok().json(json!({
            "gestion": gestion,
            "filas": previa.filas,
            "resumen": previa.resumen,
        })),
        Err(e) => HttpResponse::BadRequest().json(json!({"error": format!("{}", e)})),
    }
}

/// POST /oferta/confirm
/// Revalida el archivo y, sólo si no hay filas con error, lo entrega al
/// sistema externo. El resultado del colaborador se devuelve tal cual.
async fn oferta_confirm_handler(payload: Multipart, data: web::Data<Estado>) -> impl Responder {
    let (archivo, gestion) = leer_formulario_oferta(payload).await;
    let archivo = match archivo {
        Some(a) => a,
        None => return HttpResponse::BadRequest().json(json!({"error": "debe adjuntar un archivo de oferta"})),
    };
    let gestion = match gestion {
        Some(g) => g,
        None => return HttpResponse::BadRequest().json(json!({"error": "debe seleccionar una gestión"})),
    };

    let previa = match vista_previa(&archivo, &gestion, data.servidor.as_ref()) {
        Ok(p) => p,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("{}", e)})),
    };

    // La compuerta local es un conflicto con el estado del archivo (409),
    // no un error de formulario; un colaborador caído es 502.
    if previa.resumen.error > 0 {
        return HttpResponse::Conflict().json(json!({
            "error": format!(
                "no se puede confirmar: hay {} fila(s) con error; corrija el archivo y vuelva a validar",
                previa.resumen.error
            ),
            "resumen": previa.resumen,
        }));
    }

    match confirmar_oferta(&previa, &archivo.datos, &gestion, data.servidor.as_ref()) {
        Ok(resultado) => HttpResponse::Ok().json(resultado),
        Err(e) => HttpResponse::BadGateway().json(json!({"error": format!("confirmación fallida: {}", e)})),
    }
}

/// GET /oferta/plantilla
/// Descarga la plantilla CSV estática con el esquema requerido.
async fn oferta_plantilla_handler() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            "attachment; filename=\"plantilla_oferta.csv\"",
        ))
        .body(PLANTILLA_CSV)
}

/// GET /sesiones?fecha=YYYY-MM-DD
/// Lista las sesiones del día decoradas con la etiqueta de día y el booleano
/// de ventana abierta (evaluado con la hora local del servidor).
async fn sesiones_handler(
    query: web::Query<std::collections::HashMap<String, String>>,
    data: web::Data<Estado>,
) -> impl Responder {
    let qm = query.into_inner();
    let fecha_str = match qm.get("fecha").and_then(|s| if s.trim().is_empty() { None } else { Some(s.clone()) }) {
        Some(f) => f,
        None => return HttpResponse::BadRequest().json(json!({"error": "fecha es requerida (YYYY-MM-DD)"})),
    };
    let fecha = match chrono::NaiveDate::parse_from_str(&fecha_str, "%Y-%m-%d") {
        Ok(f) => f,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("fecha inválida '{}': {}", fecha_str, e)})),
    };

    let ahora = chrono::Local::now().naive_local();
    match data.sesiones.listar_sesiones(fecha) {
        Ok(sesiones) => {
            let lista: Vec<serde_json::Value> = sesiones
                .iter()
                .map(|s| {
                    json!({
                        "sesion": s,
                        "dia": etiqueta_dia(s.dia_semana),
                        "habilitado": marcado_habilitado(s, ahora),
                    })
                })
                .collect();
            HttpResponse::Ok().json(json!({"fecha": fecha_str, "sesiones": lista}))
        }
        Err(e) => HttpResponse::InternalServerError().json(json!({"error": format!("no se pudieron listar las sesiones: {}", e)})),
    }
}

/// POST /asistencia/marcar
/// Revalida la ventana y el estado de una sola vez antes de delegar la
/// escritura; una sesión fuera de ventana o ya marcada se rechaza aquí.
async fn marcar_handler(body: web::Json<MarcaAsistencia>, data: web::Data<Estado>) -> impl Responder {
    let marca = body.into_inner();

    if marca.estado == EstadoMarcado::SinMarcar {
        return HttpResponse::BadRequest().json(json!({"error": "el estado debe ser present, absent o justified"}));
    }

    let sesiones = match data.sesiones.listar_sesiones(marca.fecha) {
        Ok(s) => s,
        Err(e) => return HttpResponse::InternalServerError().json(json!({"error": format!("no se pudieron leer las sesiones: {}", e)})),
    };
    let sesion = match sesiones.iter().find(|s| s.id == marca.sesion_id) {
        Some(s) => s,
        None => return HttpResponse::BadRequest().json(json!({"error": format!("no existe la sesión {} en la fecha {}", marca.sesion_id, marca.fecha)})),
    };

    let ahora = chrono::Local::now().naive_local();
    if !marcado_habilitado(sesion, ahora) {
        return HttpResponse::BadRequest().json(json!({"error": "la ventana de marcado no está abierta o la sesión ya fue marcada"}));
    }

    match data.sesiones.marcar_asistencia(&marca) {
        Ok(ok) => HttpResponse::Ok().json(json!({"ok": ok})),
        Err(e) => HttpResponse::InternalServerError().json(json!({"error": format!("no se pudo registrar la marca: {}", e)})),
    }
}

async fn help_handler() -> impl Responder {
    let ejemplo_marca = json!({
        "sesion_id": 12,
        "fecha": "2024-01-08",
        "estado": "present",
        "justificacion": null
    });

    let help = json!({
        "description": "API del núcleo de asistencia e import de ofertas. La validación de ofertas es local y en dos fases (preview, luego confirm); el marcado de asistencia sólo se habilita dentro de la ventana de la sesión (15 min antes del inicio a 30 min después del fin).",
        "endpoints": {
            "POST /oferta/preview": "multipart: campo 'archivo' (CSV) + campo 'gestion'; devuelve filas validadas y resumen",
            "POST /oferta/confirm": "mismo formulario; sólo procede si el resumen no tiene errores",
            "GET /oferta/plantilla": "descarga la plantilla CSV con el esquema requerido",
            "GET /sesiones?fecha=YYYY-MM-DD": "sesiones del día con etiqueta de día y ventana",
            "POST /asistencia/marcar": "registra una marca si la ventana está abierta"
        },
        "marcar_example": ejemplo_marca,
        "csv_columns": ["carrera_sigla", "materia_codigo", "paralelo", "turno", "capacidad"]
    });

    HttpResponse::Ok().json(help)
}

/// Tabla de rutas, separada para poder montar la App en pruebas HTTP.
pub fn configurar_rutas(cfg: &mut web::ServiceConfig) {
    cfg.route("/oferta/preview", web::post().to(oferta_preview_handler))
        .route("/oferta/confirm", web::post().to(oferta_confirm_handler))
        .route("/oferta/plantilla", web::get().to(oferta_plantilla_handler))
        .route("/sesiones", web::get().to(sesiones_handler))
        .route("/asistencia/marcar", web::post().to(marcar_handler))
        .route("/help", web::get().to(help_handler));
}

pub async fn run_server(bind_addr: &str, estado: Estado) -> std::io::Result<()> {
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(estado.clone()))
            .wrap(Cors::permissive())
            .configure(configurar_rutas)
    })
    .bind(bind_addr)?
    .run()
    .await
}
