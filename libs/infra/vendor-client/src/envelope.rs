// [libs/infra/vendor-client/src/envelope.rs]
/*!
 * APARATO: VENDOR ENVELOPE (ESTRATO L3)
 * RESPONSABILIDAD: FORMA DE PETICION/RESPUESTA COMPARTIDA POR TODOS LOS ENDPOINTS SIGIT
 *
 * Cada endpoint del proveedor envuelve su carga util en `{header, body}`. La
 * forma de `body` varia por endpoint (lista, objeto, o ausente); se modela
 * como un valor discriminado extraido por un unico parser, en vez de checks
 * `if "body" in ...` dispersos por cada llamada.
 */

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RequestHeader {
    pub logged_user: String,
    pub user_token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestEnvelope<T: Serialize> {
    pub header: RequestHeader,
    pub body: T,
}

/// La forma discriminada de `body` en una respuesta del vendor.
#[derive(Debug, Clone)]
pub enum VendorBody {
    List(Vec<serde_json::Value>),
    Dict(serde_json::Value),
    Absent,
}

impl VendorBody {
    pub fn as_list(&self) -> Option<&[serde_json::Value]> {
        match self {
            VendorBody::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&serde_json::Value> {
        match self {
            VendorBody::Dict(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, VendorBody::Absent)
    }
}

/// El envelope de respuesta completo tal como llega del vendor.
#[derive(Debug, Clone)]
pub struct ResponseEnvelope {
    pub result_code: Option<String>,
    pub user_token: Option<String>,
    pub body: VendorBody,
    pub raw: serde_json::Value,
}

impl ResponseEnvelope {
    /// `header.result_code == "000"` es exito; cualquier otro valor se trata
    /// como una senal de ausencia de datos, no como un fallo de transporte.
    pub fn is_success(&self) -> bool {
        self.result_code.as_deref() == Some("000")
    }

    /// Extrae el token del vendor, probando las tres posiciones documentadas
    /// en orden: `user_token` de tope, `token` de tope, `header.user_token`.
    pub fn extract_token(raw: &serde_json::Value) -> Option<String> {
        raw.get("user_token")
            .and_then(|v| v.as_str())
            .or_else(|| raw.get("token").and_then(|v| v.as_str()))
            .or_else(|| raw.get("header").and_then(|h| h.get("user_token")).and_then(|v| v.as_str()))
            .map(str::to_string)
    }
}

/// Analiza una respuesta cruda del vendor en su envelope discriminado.
pub fn parse_response_envelope(raw: serde_json::Value) -> ResponseEnvelope {
    let header = raw.get("header");
    let result_code = header
        .and_then(|h| h.get("result_code"))
        .and_then(|v| v.as_str())
        .map(str::to_string);
    let user_token = ResponseEnvelope::extract_token(&raw);

    let body = match raw.get("body") {
        None | Some(serde_json::Value::Null) => VendorBody::Absent,
        Some(serde_json::Value::Array(items)) => VendorBody::List(items.clone()),
        Some(other @ serde_json::Value::Object(_)) => VendorBody::Dict(other.clone()),
        Some(_) => VendorBody::Absent,
    };

    ResponseEnvelope { result_code, user_token, body, raw }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_found_at_top_level_user_token() {
        let raw = serde_json::json!({"user_token": "abc123"});
        assert_eq!(ResponseEnvelope::extract_token(&raw), Some("abc123".to_string()));
    }

    #[test]
    fn token_falls_back_to_top_level_token() {
        let raw = serde_json::json!({"token": "xyz789"});
        assert_eq!(ResponseEnvelope::extract_token(&raw), Some("xyz789".to_string()));
    }

    #[test]
    fn token_falls_back_to_header_user_token() {
        let raw = serde_json::json!({"header": {"user_token": "deep456"}});
        assert_eq!(ResponseEnvelope::extract_token(&raw), Some("deep456".to_string()));
    }

    #[test]
    fn probe_order_prefers_top_level_over_header() {
        let raw = serde_json::json!({"user_token": "top", "header": {"user_token": "deep"}});
        assert_eq!(ResponseEnvelope::extract_token(&raw), Some("top".to_string()));
    }

    #[test]
    fn body_list_is_recognised_as_list_variant() {
        let raw = serde_json::json!({"header": {"result_code": "000"}, "body": [{"a": 1}]});
        let envelope = parse_response_envelope(raw);
        assert!(envelope.is_success());
        assert_eq!(envelope.body.as_list().map(|l| l.len()), Some(1));
    }

    #[test]
    fn body_absent_is_recognised_as_absent_variant() {
        let raw = serde_json::json!({"header": {"result_code": "001"}});
        let envelope = parse_response_envelope(raw);
        assert!(!envelope.is_success());
        assert!(envelope.body.is_absent());
    }
}
