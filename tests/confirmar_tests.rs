use std::sync::Mutex;

use aulaflow::colaboradores::ServidorOferta;
use aulaflow::importar::{confirmar_oferta, validar_oferta};
use aulaflow::models::{ResultadoConfirm, VistaPrevia};

/// Colaborador de prueba que registra cada invocación a `confirmar`.
struct ServidorMock {
    llamadas: Mutex<Vec<(Vec<u8>, String)>>,
    respuesta: Result<ResultadoConfirm, String>,
}

impl ServidorMock {
    fn nuevo(respuesta: Result<ResultadoConfirm, String>) -> ServidorMock {
        ServidorMock {
            llamadas: Mutex::new(Vec::new()),
            respuesta,
        }
    }

    fn llamadas(&self) -> Vec<(Vec<u8>, String)> {
        self.llamadas.lock().unwrap().clone()
    }
}

impl ServidorOferta for ServidorMock {
    fn preview(
        &self,
        _archivo: &[u8],
        _gestion: &str,
    ) -> Result<VistaPrevia, Box<dyn std::error::Error>> {
        Err("preview no se usa en estas pruebas".into())
    }

    fn confirmar(
        &self,
        archivo: &[u8],
        gestion: &str,
    ) -> Result<ResultadoConfirm, Box<dyn std::error::Error>> {
        self.llamadas
            .lock()
            .unwrap()
            .push((archivo.to_vec(), gestion.to_string()));
        match &self.respuesta {
            Ok(r) => Ok(*r),
            Err(e) => Err(e.clone().into()),
        }
    }
}

const OFERTA_OK: &str = "carrera_sigla,materia_codigo,paralelo,turno,capacidad\n\
SIS,INF-121,A,manana,40\n\
SIS,MAT-101,B,tarde,35\n";

const OFERTA_CON_ERROR: &str = "carrera_sigla,materia_codigo,paralelo,turno,capacidad\n\
SIS,INF-121,A,manana,40\n\
SIS,INF-121,A,manana,abc\n";

#[test]
fn test_confirmar_bloqueado_con_errores() {
    let previa = validar_oferta(OFERTA_CON_ERROR).unwrap();
    assert_eq!(previa.resumen.error, 1);

    let mock = ServidorMock::nuevo(Ok(ResultadoConfirm {
        insertados: 0,
        actualizados: 0,
        omitidos: 0,
        errores: 0,
    }));

    let resultado = confirmar_oferta(&previa, OFERTA_CON_ERROR.as_bytes(), "2024-1", &mock);
    let msg = resultado.unwrap_err().to_string();
    assert!(msg.contains("no se puede confirmar"), "mensaje: {}", msg);

    // la compuerta local rechaza ANTES de llegar al sistema externo
    assert!(mock.llamadas().is_empty());
}

#[test]
fn test_confirmar_entrega_archivo_y_gestion() {
    let previa = validar_oferta(OFERTA_OK).unwrap();
    assert_eq!(previa.resumen.error, 0);

    let esperado = ResultadoConfirm {
        insertados: 2,
        actualizados: 0,
        omitidos: 1,
        errores: 0,
    };
    let mock = ServidorMock::nuevo(Ok(esperado));

    let resultado = confirmar_oferta(&previa, OFERTA_OK.as_bytes(), "2024-1", &mock).unwrap();
    // el resultado del colaborador se devuelve tal cual
    assert_eq!(resultado, esperado);

    let llamadas = mock.llamadas();
    assert_eq!(llamadas.len(), 1);
    assert_eq!(llamadas[0].0, OFERTA_OK.as_bytes());
    assert_eq!(llamadas[0].1, "2024-1");
}

#[test]
fn test_fallo_del_colaborador_no_toca_la_previa() {
    let previa = validar_oferta(OFERTA_OK).unwrap();
    let copia = previa.clone();

    let mock = ServidorMock::nuevo(Err("backend caído".to_string()));
    let resultado = confirmar_oferta(&previa, OFERTA_OK.as_bytes(), "2024-1", &mock);
    assert!(resultado.is_err());

    // el fallo se reporta una vez; las filas y el resumen de la última
    // validación quedan intactos para que el usuario reintente manualmente
    assert_eq!(previa, copia);
    assert_eq!(mock.llamadas().len(), 1);
}

#[test]
fn test_confirmar_con_advertencias_procede() {
    // warn no bloquea: sólo error > 0 cierra la compuerta. La validación
    // local nunca produce warn, así que se simula una previa del servidor.
    let mut previa = validar_oferta(OFERTA_OK).unwrap();
    previa.resumen.warn = 1;
    previa.resumen.ok -= 1;

    let mock = ServidorMock::nuevo(Ok(ResultadoConfirm {
        insertados: 1,
        actualizados: 1,
        omitidos: 0,
        errores: 0,
    }));
    assert!(confirmar_oferta(&previa, OFERTA_OK.as_bytes(), "2024-1", &mock).is_ok());
    assert_eq!(mock.llamadas().len(), 1);
}
