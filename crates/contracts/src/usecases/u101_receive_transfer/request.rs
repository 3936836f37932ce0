use crate::enums::comment_kind::CommentKind;
use crate::enums::discrepancy_kind::DiscrepancyKind;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Запрос на создание записи приёмки (POST /api/a003/receptions)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiveTransferRequest {
    /// Исходное перемещение
    pub transfer_id: Uuid,

    /// Склад, оформляющий приёмку
    pub received_by_warehouse_id: Uuid,

    /// Строки приёмки (по одной на строку манифеста)
    pub items: Vec<ReceiveTransferItem>,
}

/// Строка запроса приёмки
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiveTransferItem {
    pub transfer_item_id: Uuid,
    pub product_variant_id: Uuid,
    pub quantity_received: f64,
    pub unit: String,
    pub received_batch: Option<String>,
    pub received_expiry_date: Option<String>,
    pub discrepancy_kind: Option<DiscrepancyKind>,
    pub discrepancy_notes: String,
    pub is_accepted: bool,
}

/// Пакетная регистрация расхождений
/// (POST /api/a003/receptions/{id}/discrepancies)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDiscrepanciesRequest {
    /// Общее описание инцидента
    pub discrepancy_description: String,

    /// Ссылки на подтверждающие материалы
    pub evidence_urls: Vec<String>,

    /// Позиции с расхождениями
    pub items: Vec<DiscrepancyReportItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscrepancyReportItem {
    pub transfer_reception_item_id: Uuid,
    pub discrepancy_kind: DiscrepancyKind,
    pub discrepancy_notes: String,
    pub is_accepted: bool,
}

/// Запрос на завершение урегулирования
/// (POST /api/a003/receptions/{id}/resolve)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveReceptionRequest {
    /// Итоговое описание урегулирования
    pub resolution_description: String,

    /// Тип урегулирования (wire-код, напр. "accept_all")
    pub resolution_type: String,

    /// Позиции к возврату на склад-отправитель
    pub items_to_return: Vec<Uuid>,

    /// Позиции, принимаемые с корректировкой количества
    pub items_to_accept: Vec<ItemResolution>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResolution {
    pub transfer_reception_item_id: Uuid,
    pub final_quantity_accepted: f64,
    pub adjustment_notes: String,
}

/// Запрос на добавление комментария
/// (POST /api/a003/receptions/{id}/comments)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCommentRequest {
    pub message: String,
    pub kind: CommentKind,
}

/// Ответ сервера на загрузку подтверждающих материалов.
///
/// Форма ответа исторически нестабильна: встречаются `urls` как массив,
/// `urls` как одиночная строка и `url`. Клиент обязан переживать любую
/// из них, а при пустом ответе — перечитать запись приёмки целиком.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UploadEvidenceResponse {
    #[serde(default)]
    pub urls: Option<serde_json::Value>,
    #[serde(default)]
    pub url: Option<String>,
}

impl UploadEvidenceResponse {
    /// Извлечь список ссылок, если форма ответа распознана
    pub fn into_urls(self) -> Option<Vec<String>> {
        if let Some(value) = self.urls {
            match value {
                serde_json::Value::Array(items) => {
                    // массив с нестроковыми элементами — нераспознанная
                    // форма, а не частичный список
                    let urls: Option<Vec<String>> = items
                        .into_iter()
                        .map(|v| v.as_str().map(str::to_string))
                        .collect();
                    return urls;
                }
                serde_json::Value::String(s) => return Some(vec![s]),
                _ => {}
            }
        }
        self.url.map(|u| vec![u])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_response_array() {
        let resp: UploadEvidenceResponse =
            serde_json::from_str(r#"{"urls": ["/files/a.jpg", "/files/b.jpg"]}"#).unwrap();
        assert_eq!(
            resp.into_urls(),
            Some(vec!["/files/a.jpg".to_string(), "/files/b.jpg".to_string()])
        );
    }

    #[test]
    fn test_upload_response_single_string() {
        let resp: UploadEvidenceResponse =
            serde_json::from_str(r#"{"urls": "/files/a.jpg"}"#).unwrap();
        assert_eq!(resp.into_urls(), Some(vec!["/files/a.jpg".to_string()]));
    }

    #[test]
    fn test_upload_response_url_field() {
        let resp: UploadEvidenceResponse =
            serde_json::from_str(r#"{"url": "/files/a.jpg"}"#).unwrap();
        assert_eq!(resp.into_urls(), Some(vec!["/files/a.jpg".to_string()]));
    }

    #[test]
    fn test_upload_response_unknown_shape() {
        let resp: UploadEvidenceResponse = serde_json::from_str(r#"{"urls": 42}"#).unwrap();
        assert_eq!(resp.into_urls(), None);

        let resp: UploadEvidenceResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(resp.into_urls(), None);
    }

    #[test]
    fn test_upload_response_array_with_non_strings() {
        let resp: UploadEvidenceResponse =
            serde_json::from_str(r#"{"urls": ["/files/a.jpg", 42]}"#).unwrap();
        assert_eq!(resp.into_urls(), None);
    }
}
