use std::path::PathBuf;

use aulaflow::colaboradores::archivo::{OfertaArchivo, SesionesArchivo};
use aulaflow::colaboradores::{RepositorioSesiones, ServidorOferta};
use aulaflow::models::{EstadoMarcado, MarcaAsistencia, SesionProgramada};
use chrono::{NaiveDate, NaiveTime};

fn dir_de_prueba(nombre: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("aulaflow_{}_{}", nombre, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn sesion(id: i64, fecha: NaiveDate) -> SesionProgramada {
    SesionProgramada {
        id,
        materia: "INF-121".to_string(),
        paralelo: "A".to_string(),
        dia_semana: 1,
        fecha,
        hora_inicio: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        hora_fin: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        estado: EstadoMarcado::SinMarcar,
    }
}

#[test]
fn test_marcado_una_sola_vez() {
    let dir = dir_de_prueba("marcado");
    let lunes = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();

    // sembrar el archivo de sesiones
    let sesiones = vec![sesion(1, lunes), sesion(2, lunes)];
    std::fs::write(
        dir.join("sesiones.json"),
        serde_json::to_string_pretty(&sesiones).unwrap(),
    )
    .unwrap();

    let repo = SesionesArchivo::new(&dir);
    let marca = MarcaAsistencia {
        sesion_id: 1,
        fecha: lunes,
        estado: EstadoMarcado::Presente,
        justificacion: None,
    };

    // la primera marca escribe; la segunda no sobreescribe
    assert!(repo.marcar_asistencia(&marca).unwrap());
    assert!(!repo.marcar_asistencia(&marca).unwrap());

    let del_dia = repo.listar_sesiones(lunes).unwrap();
    let marcada = del_dia.iter().find(|s| s.id == 1).unwrap();
    assert_eq!(marcada.estado, EstadoMarcado::Presente);
    let sin_marcar = del_dia.iter().find(|s| s.id == 2).unwrap();
    assert_eq!(sin_marcar.estado, EstadoMarcado::SinMarcar);
}

#[test]
fn test_listar_filtra_por_fecha() {
    let dir = dir_de_prueba("listar");
    let lunes = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
    let martes = NaiveDate::from_ymd_opt(2024, 1, 9).unwrap();

    let sesiones = vec![sesion(1, lunes), sesion(2, martes), sesion(3, lunes)];
    std::fs::write(
        dir.join("sesiones.json"),
        serde_json::to_string_pretty(&sesiones).unwrap(),
    )
    .unwrap();

    let repo = SesionesArchivo::new(&dir);
    let del_lunes = repo.listar_sesiones(lunes).unwrap();
    assert_eq!(del_lunes.len(), 2);
    assert!(del_lunes.iter().all(|s| s.fecha == lunes));
}

#[test]
fn test_marcar_sesion_inexistente_falla() {
    let dir = dir_de_prueba("inexistente");
    let repo = SesionesArchivo::new(&dir);
    let marca = MarcaAsistencia {
        sesion_id: 99,
        fecha: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
        estado: EstadoMarcado::Ausente,
        justificacion: None,
    };
    assert!(repo.marcar_asistencia(&marca).is_err());
}

#[test]
fn test_oferta_archivo_guarda_y_cuenta() {
    let dir = dir_de_prueba("oferta");
    let servidor = OfertaArchivo::new(&dir);

    let csv = "carrera_sigla,materia_codigo,paralelo,turno,capacidad\n\
SIS,INF-121,A,manana,40\n\
SIS,MAT-101,B,tarde,35\n";
    let resultado = servidor.confirmar(csv.as_bytes(), "2024-1").unwrap();
    assert_eq!(resultado.insertados, 2);

    let guardado = std::fs::read(dir.join("ofertas").join("oferta_2024-1.csv")).unwrap();
    assert_eq!(guardado, csv.as_bytes());
}

#[test]
fn test_oferta_archivo_rechaza_gestion_con_ruta() {
    let dir = dir_de_prueba("gestion");
    let servidor = OfertaArchivo::new(&dir);
    // separadores de ruta de cualquier plataforma y caracteres fuera del
    // alfabeto permitido no llegan al nombre de archivo
    assert!(servidor.confirmar(b"x", "../2024").is_err());
    assert!(servidor.confirmar(b"x", "..\\2024").is_err());
    assert!(servidor.confirmar(b"x", "2024/1").is_err());
    assert!(servidor.confirmar(b"x", "2024 1").is_err());
    assert!(servidor.confirmar(b"x", "").is_err());
    assert!(servidor.confirmar(b"x", "2024-1").is_ok());
    assert!(servidor.confirmar(b"x", "gestion_2024").is_ok());
}
