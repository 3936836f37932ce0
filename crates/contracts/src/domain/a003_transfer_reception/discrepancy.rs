//! Реестр расхождений: чистая деривация записей из приёмки либо из
//! черновика, разбор легаси-кодировки примечаний и правила
//! урегулирования складом-отправителем.

use crate::domain::a002_warehouse_transfer::aggregate::WarehouseTransfer;
use crate::domain::a001_warehouse::aggregate::WarehouseId;
use crate::domain::a003_transfer_reception::aggregate::TransferReception;
use crate::domain::a003_transfer_reception::draft::ReceptionDraft;
use crate::enums::discrepancy_kind::DiscrepancyKind;
use crate::usecases::u101_receive_transfer::request::{ItemResolution, ResolveReceptionRequest};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Разделитель описания и текста урегулирования в легаси-записях,
/// где оба текста хранились одним полем
pub const LEGACY_NOTES_DELIMITER: &str = "; ";

/// Статус записи реестра расхождений
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscrepancyStatus {
    Pending,
    Resolved,
}

/// Запись реестра расхождений.
///
/// Не хранится отдельно до урегулирования: каждый раз выводится заново
/// из записи приёмки (или из черновика до её создания).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Discrepancy {
    /// ID строки приёмки (до создания записи — id строки перемещения)
    pub item_id: Uuid,

    /// Название товара
    pub product_name: String,

    /// Тип расхождения (у легаси-записей может отсутствовать)
    pub kind: Option<DiscrepancyKind>,

    /// Статус урегулирования
    pub status: DiscrepancyStatus,

    /// Описание расхождения (до урегулирования)
    pub description: String,

    /// Текст урегулирования (после)
    pub resolution: String,

    /// Фактически принятое количество по строке, если известно
    pub quantity_received: Option<f64>,
}

/// Разобрать легаси-поле примечаний на описание и урегулирование.
///
/// Две и более части — первая является описанием, остаток (склеенный
/// обратно тем же разделителем) — урегулированием. Единственная часть
/// трактуется по флагу урегулирования приёмки: урегулировано — это
/// текст урегулирования, иначе — описание.
pub fn split_notes(notes: &str, is_resolved: bool) -> (String, String) {
    let mut parts = notes.splitn(2, LEGACY_NOTES_DELIMITER);
    let first = parts.next().unwrap_or_default();
    match parts.next() {
        Some(rest) => (first.to_string(), rest.to_string()),
        None => {
            if is_resolved {
                (String::new(), notes.to_string())
            } else {
                (notes.to_string(), String::new())
            }
        }
    }
}

/// Вывести реестр из подтверждённой сервером записи приёмки.
///
/// В реестр попадают строки, принятые с замечаниями: не принятые, с
/// типом расхождения либо с непустыми примечаниями.
pub fn derive_from_reception(reception: &TransferReception) -> Vec<Discrepancy> {
    let resolved = reception.is_discrepancy_resolved;

    reception
        .items
        .iter()
        .filter(|item| {
            !item.is_accepted
                || item.discrepancy_kind.is_some()
                || !item.discrepancy_notes.is_empty()
        })
        .map(|item| {
            // раздельное поле урегулирования — основной канал;
            // разбор по разделителю остаётся для легаси-записей
            let (description, resolution) = match &item.resolution_notes {
                Some(resolution) => (item.discrepancy_notes.clone(), resolution.clone()),
                None => split_notes(&item.discrepancy_notes, resolved),
            };

            Discrepancy {
                item_id: item.id,
                product_name: item.product_name.clone(),
                kind: item.discrepancy_kind,
                status: if resolved {
                    DiscrepancyStatus::Resolved
                } else {
                    DiscrepancyStatus::Pending
                },
                description,
                resolution,
                quantity_received: Some(item.quantity_received),
            }
        })
        .collect()
}

/// Вывести предварительный реестр из черновика (запись приёмки ещё не
/// создана): только строки с типом расхождения, всегда `Pending`.
pub fn derive_from_draft(draft: &ReceptionDraft) -> Vec<Discrepancy> {
    draft
        .items
        .iter()
        .filter(|item| item.discrepancy_kind.is_some())
        .map(|item| Discrepancy {
            item_id: item.transfer_item_id,
            product_name: item.product_name.clone(),
            kind: item.discrepancy_kind,
            status: DiscrepancyStatus::Pending,
            description: item.discrepancy_notes.clone(),
            resolution: String::new(),
            quantity_received: Some(item.quantity_received),
        })
        .collect()
}

/// Урегулировать расхождения может только склад-отправитель перемещения
pub fn can_resolve(current_warehouse_id: WarehouseId, transfer: &WarehouseTransfer) -> bool {
    transfer.is_origin(current_warehouse_id)
}

/// Текст урегулирования обязателен (пробельный текст не принимается)
pub fn validate_resolution_note(note: &str) -> Result<(), String> {
    if note.trim().is_empty() {
        return Err("Укажите текст урегулирования".to_string());
    }
    Ok(())
}

/// Отметить одну запись урегулированной.
///
/// Ошибка валидации текста или неизвестный id оставляют реестр без
/// изменений.
pub fn resolve_entry(
    ledger: &mut [Discrepancy],
    item_id: Uuid,
    note: &str,
) -> Result<(), String> {
    validate_resolution_note(note)?;
    let entry = ledger
        .iter_mut()
        .find(|d| d.item_id == item_id)
        .ok_or_else(|| "Расхождение не найдено".to_string())?;
    entry.status = DiscrepancyStatus::Resolved;
    entry.resolution = note.trim().to_string();
    Ok(())
}

/// Завершение урегулирования доступно, когда реестр не пуст и все
/// записи урегулированы
pub fn can_complete_resolution(ledger: &[Discrepancy]) -> bool {
    !ledger.is_empty() && ledger.iter().all(|d| d.status == DiscrepancyStatus::Resolved)
}

/// Собрать запрос на завершение урегулирования.
///
/// Итоговое принятое количество берётся из строки; если оно неизвестно,
/// отправляется 0 — поведение исходной системы сохранено намеренно.
pub fn build_resolution_request(ledger: &[Discrepancy]) -> ResolveReceptionRequest {
    ResolveReceptionRequest {
        resolution_description: format!("Урегулировано позиций: {}", ledger.len()),
        resolution_type: "accept_adjusted".to_string(),
        items_to_return: Vec::new(),
        items_to_accept: ledger
            .iter()
            .map(|d| ItemResolution {
                transfer_reception_item_id: d.item_id,
                final_quantity_accepted: d.quantity_received.unwrap_or(0.0),
                adjustment_notes: d.resolution.clone(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_warehouse_transfer::aggregate::{
        TransferLine, WarehouseTransferId,
    };
    use crate::domain::a003_transfer_reception::aggregate::{
        ReceptionItem, TransferReceptionId,
    };
    use crate::domain::common::BaseAggregate;
    use crate::enums::reception_status::ReceptionStatus;
    use crate::enums::transfer_status::TransferStatus;

    fn reception_with_item(
        notes: &str,
        resolution_notes: Option<&str>,
        is_resolved: bool,
        is_accepted: bool,
    ) -> TransferReception {
        TransferReception {
            base: BaseAggregate::new(
                TransferReceptionId::new(Uuid::new_v4()),
                "ПРМ-000001".to_string(),
                "Приёмка".to_string(),
            ),
            transfer_id: WarehouseTransferId::new(Uuid::new_v4()),
            status: if is_resolved {
                ReceptionStatus::Resolved
            } else {
                ReceptionStatus::WithDiscrepancies
            },
            is_discrepancy_resolved: is_resolved,
            items: vec![ReceptionItem {
                id: Uuid::new_v4(),
                transfer_item_id: Uuid::new_v4(),
                product_variant_id: Uuid::new_v4(),
                product_name: "Товар 1".to_string(),
                unit: "шт".to_string(),
                quantity_requested: 10.0,
                quantity_received: 7.0,
                received_batch: None,
                received_expiry_date: None,
                discrepancy_kind: Some(DiscrepancyKind::Damaged),
                discrepancy_notes: notes.to_string(),
                resolution_notes: resolution_notes.map(str::to_string),
                is_accepted,
            }],
            evidence_urls: Vec::new(),
            comments: Vec::new(),
        }
    }

    #[test]
    fn test_split_notes_two_parts() {
        let (description, resolution) =
            split_notes("damaged in transit; replaced 3 units", false);
        assert_eq!(description, "damaged in transit");
        assert_eq!(resolution, "replaced 3 units");
    }

    #[test]
    fn test_split_notes_many_parts_rejoined() {
        let (description, resolution) = split_notes("a; b; c", false);
        assert_eq!(description, "a");
        assert_eq!(resolution, "b; c");
    }

    #[test]
    fn test_split_notes_single_part_depends_on_flag() {
        let (description, resolution) = split_notes("damaged in transit", false);
        assert_eq!(description, "damaged in transit");
        assert_eq!(resolution, "");

        let (description, resolution) = split_notes("damaged in transit", true);
        assert_eq!(description, "");
        assert_eq!(resolution, "damaged in transit");
    }

    #[test]
    fn test_derive_from_reception_legacy_split() {
        let reception = reception_with_item("вмятина; заменили 3 шт", None, true, false);
        let ledger = derive_from_reception(&reception);

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].description, "вмятина");
        assert_eq!(ledger[0].resolution, "заменили 3 шт");
        assert_eq!(ledger[0].status, DiscrepancyStatus::Resolved);
        assert_eq!(ledger[0].quantity_received, Some(7.0));
    }

    #[test]
    fn test_derive_from_reception_prefers_distinct_field() {
        // раздельное поле выигрывает у разбора по разделителю
        let reception =
            reception_with_item("вмятина; не разбирать", Some("заменили"), false, false);
        let ledger = derive_from_reception(&reception);

        assert_eq!(ledger[0].description, "вмятина; не разбирать");
        assert_eq!(ledger[0].resolution, "заменили");
        assert_eq!(ledger[0].status, DiscrepancyStatus::Pending);
    }

    #[test]
    fn test_derive_pending_entry_has_empty_resolution_text() {
        // текст урегулирования всегда строка: у неурегулированных
        // записей он пуст, а не отсутствует
        let reception = reception_with_item("вмятина", None, false, false);
        let ledger = derive_from_reception(&reception);

        assert_eq!(ledger[0].status, DiscrepancyStatus::Pending);
        assert_eq!(ledger[0].resolution, "");
    }

    #[test]
    fn test_rederive_after_resolution_flips_status() {
        let mut reception = reception_with_item("вмятина", None, false, false);
        let ledger = derive_from_reception(&reception);
        assert_eq!(ledger[0].status, DiscrepancyStatus::Pending);

        // запись приёмки перечитана уже урегулированной: повторная
        // деривация обязана отразить новое состояние
        reception.is_discrepancy_resolved = true;
        reception.status = ReceptionStatus::Resolved;
        reception.items[0].resolution_notes = Some("заменили".to_string());

        let ledger = derive_from_reception(&reception);
        assert_eq!(ledger[0].status, DiscrepancyStatus::Resolved);
        assert_eq!(ledger[0].resolution, "заменили");
    }

    #[test]
    fn test_derive_skips_clean_items() {
        let mut reception = reception_with_item("", None, false, true);
        reception.items[0].discrepancy_kind = None;
        assert!(derive_from_reception(&reception).is_empty());

        // не принятая строка попадает в реестр даже без типа и примечаний
        reception.items[0].is_accepted = false;
        assert_eq!(derive_from_reception(&reception).len(), 1);
    }

    #[test]
    fn test_resolve_entry_rejects_blank_note() {
        let reception = reception_with_item("вмятина", None, false, false);
        let mut ledger = derive_from_reception(&reception);
        let id = ledger[0].item_id;

        assert!(resolve_entry(&mut ledger, id, "").is_err());
        assert!(resolve_entry(&mut ledger, id, "   \t").is_err());
        assert_eq!(ledger[0].status, DiscrepancyStatus::Pending);

        assert!(resolve_entry(&mut ledger, id, " заменили 3 шт ").is_ok());
        assert_eq!(ledger[0].status, DiscrepancyStatus::Resolved);
        assert_eq!(ledger[0].resolution, "заменили 3 шт");
    }

    #[test]
    fn test_complete_resolution_gate() {
        assert!(!can_complete_resolution(&[]));

        let reception = reception_with_item("вмятина", None, false, false);
        let mut ledger = derive_from_reception(&reception);
        assert!(!can_complete_resolution(&ledger));

        let id = ledger[0].item_id;
        resolve_entry(&mut ledger, id, "заменили").unwrap();
        assert!(can_complete_resolution(&ledger));
    }

    #[test]
    fn test_resolution_request_quantity_fallback() {
        let reception = reception_with_item("вмятина", None, false, false);
        let mut ledger = derive_from_reception(&reception);
        let id = ledger[0].item_id;
        resolve_entry(&mut ledger, id, "заменили").unwrap();

        let request = build_resolution_request(&ledger);
        assert_eq!(request.items_to_accept.len(), 1);
        assert_eq!(request.items_to_accept[0].final_quantity_accepted, 7.0);
        assert_eq!(request.items_to_accept[0].adjustment_notes, "заменили");

        // неизвестное количество уходит нулём (поведение источника)
        ledger[0].quantity_received = None;
        let request = build_resolution_request(&ledger);
        assert_eq!(request.items_to_accept[0].final_quantity_accepted, 0.0);
    }

    #[test]
    fn test_can_resolve_origin_only() {
        let origin = WarehouseId::new(Uuid::new_v4());
        let destination = WarehouseId::new(Uuid::new_v4());
        let transfer = WarehouseTransfer {
            base: BaseAggregate::new(
                WarehouseTransferId::new(Uuid::new_v4()),
                "ПЕР-000001".to_string(),
                "Перемещение".to_string(),
            ),
            document_no: "ПЕР-000001".to_string(),
            document_date: chrono::Utc::now(),
            origin_warehouse_id: origin,
            destination_warehouse_id: destination,
            status: TransferStatus::WithDiscrepancies,
            lines: Vec::<TransferLine>::new(),
        };

        assert!(can_resolve(origin, &transfer));
        assert!(!can_resolve(destination, &transfer));
    }

    #[test]
    fn test_derive_from_draft_always_pending() {
        use crate::domain::a002_warehouse_transfer::aggregate::WarehouseTransfer;

        let transfer = WarehouseTransfer {
            base: BaseAggregate::new(
                WarehouseTransferId::new(Uuid::new_v4()),
                "ПЕР-000002".to_string(),
                "Перемещение".to_string(),
            ),
            document_no: "ПЕР-000002".to_string(),
            document_date: chrono::Utc::now(),
            origin_warehouse_id: WarehouseId::new(Uuid::new_v4()),
            destination_warehouse_id: WarehouseId::new(Uuid::new_v4()),
            status: TransferStatus::InTransit,
            lines: vec![
                TransferLine {
                    id: Uuid::new_v4(),
                    product_variant_id: Uuid::new_v4(),
                    product_name: "Товар 1".to_string(),
                    unit: "шт".to_string(),
                    quantity_requested: 10.0,
                },
                TransferLine {
                    id: Uuid::new_v4(),
                    product_variant_id: Uuid::new_v4(),
                    product_name: "Товар 2".to_string(),
                    unit: "шт".to_string(),
                    quantity_requested: 4.0,
                },
            ],
        };

        let mut draft = ReceptionDraft::from_transfer(&transfer);
        draft.update_quantity(0, 6.0);
        draft.toggle_discrepancy(0);
        draft.set_discrepancy_notes(0, "недостача 4 шт".to_string());
        draft.update_quantity(1, 4.0);

        let ledger = derive_from_draft(&draft);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].status, DiscrepancyStatus::Pending);
        assert_eq!(ledger[0].description, "недостача 4 шт");
        assert_eq!(ledger[0].resolution, "");
        assert_eq!(ledger[0].item_id, draft.items[0].transfer_item_id);
    }
}
