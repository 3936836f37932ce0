//! Черновик приёмки: сверка количеств по строкам манифеста,
//! внеплановые товары и сборка запроса на создание записи приёмки.
//!
//! Черновик живёт только в памяти мастера приёмки; после успешного
//! создания записи источником истины становится агрегат
//! `TransferReception`.

use crate::domain::a002_warehouse_transfer::aggregate::WarehouseTransfer;
use crate::domain::a003_transfer_reception::aggregate::TransferReception;
use crate::enums::discrepancy_kind::DiscrepancyKind;
use crate::usecases::u101_receive_transfer::request::{
    DiscrepancyReportItem, ReceiveTransferItem, ReceiveTransferRequest, ReportDiscrepanciesRequest,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Строка черновика приёмки (одна на строку манифеста перемещения)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DraftItem {
    /// ID строки исходного перемещения
    pub transfer_item_id: Uuid,

    /// ID варианта товара
    pub product_variant_id: Uuid,

    /// Название товара
    pub product_name: String,

    /// Единица измерения
    pub unit: String,

    /// Запрошенное количество (из манифеста, неизменяемо)
    pub quantity_requested: f64,

    /// Фактически принятое количество
    pub quantity_received: f64,

    /// Фактическая партия
    pub received_batch: Option<String>,

    /// Фактический срок годности (YYYY-MM-DD)
    pub received_expiry_date: Option<String>,

    /// Тип расхождения; заполняется только через `toggle_discrepancy`
    pub discrepancy_kind: Option<DiscrepancyKind>,

    /// Примечания к расхождению
    pub discrepancy_notes: String,

    /// Строка принята без замечаний
    pub is_accepted: bool,
}

impl DraftItem {
    /// Принято меньше, чем запрошено
    pub fn is_short_received(&self) -> bool {
        self.quantity_received < self.quantity_requested
    }
}

/// Внеплановый товар: принят, но в манифесте перемещения отсутствует
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnexpectedProduct {
    pub product_name: String,
    pub quantity: f64,
    pub unit: String,
    pub batch_number: Option<String>,
    pub observations: Option<String>,
}

impl UnexpectedProduct {
    /// Пустое название или неположительное количество недопустимы
    pub fn validate(&self) -> Result<(), String> {
        if self.product_name.trim().is_empty() {
            return Err("Укажите название товара".to_string());
        }
        if self.quantity <= 0.0 {
            return Err("Количество должно быть больше нуля".to_string());
        }
        Ok(())
    }
}

/// Неблокирующее предупреждение: количество ниже запрошенного,
/// а расхождение по строке не зафиксировано
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityAdvisory {
    pub product_name: String,
    pub quantity_requested: f64,
    pub quantity_received: f64,
}

impl QuantityAdvisory {
    pub fn message(&self) -> String {
        format!(
            "«{}»: принято {} из {}. Зафиксируйте расхождение, если недостача подтверждается.",
            self.product_name, self.quantity_received, self.quantity_requested
        )
    }
}

/// Черновик приёмки перемещения
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReceptionDraft {
    /// Строки по манифесту (порядок манифеста сохраняется)
    pub items: Vec<DraftItem>,

    /// Внеплановые товары (только на клиенте, в запрос приёмки не входят)
    pub unexpected: Vec<UnexpectedProduct>,

    /// Строки с активным расхождением (по id строки перемещения)
    flagged: HashSet<Uuid>,
}

impl ReceptionDraft {
    /// Построить черновик по манифесту перемещения.
    ///
    /// Количество по умолчанию 0, все строки считаются принятыми.
    pub fn from_transfer(transfer: &WarehouseTransfer) -> Self {
        let items = transfer
            .lines
            .iter()
            .map(|line| DraftItem {
                transfer_item_id: line.id,
                product_variant_id: line.product_variant_id,
                product_name: line.product_name.clone(),
                unit: line.unit.clone(),
                quantity_requested: line.quantity_requested,
                quantity_received: 0.0,
                received_batch: None,
                received_expiry_date: None,
                discrepancy_kind: None,
                discrepancy_notes: String::new(),
                is_accepted: true,
            })
            .collect();

        Self {
            items,
            unexpected: Vec::new(),
            flagged: HashSet::new(),
        }
    }

    /// Переключить отметку расхождения по строке.
    ///
    /// Постановка отметки выставляет тип по умолчанию (недостача),
    /// очищает примечания и снимает признак принятия; снятие отметки
    /// возвращает строку в исходное состояние.
    pub fn toggle_discrepancy(&mut self, index: usize) {
        let Some(item) = self.items.get_mut(index) else {
            return;
        };

        if self.flagged.contains(&item.transfer_item_id) {
            item.discrepancy_kind = None;
            item.discrepancy_notes.clear();
            item.is_accepted = true;
            self.flagged.remove(&item.transfer_item_id);
        } else {
            item.discrepancy_kind = Some(DiscrepancyKind::MissingQuantity);
            item.discrepancy_notes.clear();
            item.is_accepted = false;
            self.flagged.insert(item.transfer_item_id);
        }
    }

    /// Записать фактическое количество (отрицательные значения
    /// приводятся к нулю).
    ///
    /// Возвращает предупреждение, если количество стало меньше
    /// запрошенного, а расхождение по строке не отмечено. Отметка
    /// автоматически НЕ ставится.
    pub fn update_quantity(&mut self, index: usize, value: f64) -> Option<QuantityAdvisory> {
        let Some(item) = self.items.get_mut(index) else {
            return None;
        };

        item.quantity_received = value.max(0.0);

        if item.is_short_received() && !self.flagged.contains(&item.transfer_item_id) {
            return Some(QuantityAdvisory {
                product_name: item.product_name.clone(),
                quantity_requested: item.quantity_requested,
                quantity_received: item.quantity_received,
            });
        }
        None
    }

    /// Выбрать тип расхождения по строке.
    ///
    /// Применяется только к строкам с активной отметкой: тип привязан
    /// к отметке и не существует отдельно от неё.
    pub fn set_discrepancy_kind(&mut self, index: usize, kind: DiscrepancyKind) {
        if let Some(item) = self.items.get_mut(index) {
            if self.flagged.contains(&item.transfer_item_id) {
                item.discrepancy_kind = Some(kind);
            }
        }
    }

    /// Записать примечания к расхождению по строке
    pub fn set_discrepancy_notes(&mut self, index: usize, notes: String) {
        if let Some(item) = self.items.get_mut(index) {
            if self.flagged.contains(&item.transfer_item_id) {
                item.discrepancy_notes = notes;
            }
        }
    }

    /// Строка отмечена расхождением
    pub fn is_flagged(&self, transfer_item_id: Uuid) -> bool {
        self.flagged.contains(&transfer_item_id)
    }

    /// Черновик содержит хотя бы одну строку с расхождением
    pub fn has_discrepancies(&self) -> bool {
        self.items.iter().any(|i| i.discrepancy_kind.is_some())
    }

    /// Приёмку можно завершить: по каждой строке либо принято не меньше
    /// запрошенного, либо расхождение зафиксировано явно.
    ///
    /// Пересчитывается честно при каждом вызове — именно этот предикат
    /// открывает первый шаг мастера приёмки.
    pub fn validate_completion(&self) -> bool {
        self.items.iter().all(|item| {
            item.quantity_received >= item.quantity_requested
                || self.flagged.contains(&item.transfer_item_id)
        })
    }

    /// Добавить внеплановый товар
    pub fn add_unexpected(&mut self, product: UnexpectedProduct) -> Result<(), String> {
        product.validate()?;
        self.unexpected.push(product);
        Ok(())
    }

    /// Убрать внеплановый товар (до завершения приёмки)
    pub fn remove_unexpected(&mut self, index: usize) {
        if index < self.unexpected.len() {
            self.unexpected.remove(index);
        }
    }

    /// Собрать запрос на создание записи приёмки.
    ///
    /// Внеплановые товары в запрос не сериализуются.
    pub fn to_receive_request(
        &self,
        transfer_id: Uuid,
        received_by_warehouse_id: Uuid,
    ) -> ReceiveTransferRequest {
        ReceiveTransferRequest {
            transfer_id,
            received_by_warehouse_id,
            items: self
                .items
                .iter()
                .map(|item| ReceiveTransferItem {
                    transfer_item_id: item.transfer_item_id,
                    product_variant_id: item.product_variant_id,
                    quantity_received: item.quantity_received,
                    unit: item.unit.clone(),
                    received_batch: item.received_batch.clone(),
                    received_expiry_date: item.received_expiry_date.clone(),
                    discrepancy_kind: item.discrepancy_kind,
                    discrepancy_notes: item.discrepancy_notes.clone(),
                    is_accepted: item.is_accepted,
                })
                .collect(),
        }
    }

    /// Собрать пакет регистрации расхождений по созданной записи.
    ///
    /// Серверные id строк берутся из эха приёмки (сопоставление по id
    /// строки перемещения). Возвращает `None`, если расхождений нет —
    /// второй вызов в этом случае не выполняется.
    pub fn to_discrepancy_report(
        &self,
        reception: &TransferReception,
    ) -> Option<ReportDiscrepanciesRequest> {
        let items: Vec<DiscrepancyReportItem> = self
            .items
            .iter()
            .filter_map(|item| {
                let kind = item.discrepancy_kind?;
                let reception_item = reception
                    .items
                    .iter()
                    .find(|ri| ri.transfer_item_id == item.transfer_item_id)?;
                let notes = if item.discrepancy_notes.trim().is_empty() {
                    format!("Зафиксировано расхождение: {}", kind.display_name())
                } else {
                    item.discrepancy_notes.clone()
                };
                Some(DiscrepancyReportItem {
                    transfer_reception_item_id: reception_item.id,
                    discrepancy_kind: kind,
                    discrepancy_notes: notes,
                    is_accepted: item.is_accepted,
                })
            })
            .collect();

        if items.is_empty() {
            return None;
        }

        Some(ReportDiscrepanciesRequest {
            discrepancy_description: format!(
                "Расхождения при приёмке, позиций: {}",
                items.len()
            ),
            evidence_urls: Vec::new(),
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_warehouse::aggregate::WarehouseId;
    use crate::domain::a002_warehouse_transfer::aggregate::{
        TransferLine, WarehouseTransfer, WarehouseTransferId,
    };
    use crate::domain::common::BaseAggregate;
    use crate::enums::transfer_status::TransferStatus;

    fn transfer_with_lines(quantities: &[f64]) -> WarehouseTransfer {
        let id = Uuid::new_v4();
        WarehouseTransfer {
            base: BaseAggregate::new(
                WarehouseTransferId::new(id),
                "ПЕР-000001".to_string(),
                "Перемещение ПЕР-000001".to_string(),
            ),
            document_no: "ПЕР-000001".to_string(),
            document_date: chrono::Utc::now(),
            origin_warehouse_id: WarehouseId::new(Uuid::new_v4()),
            destination_warehouse_id: WarehouseId::new(Uuid::new_v4()),
            status: TransferStatus::InTransit,
            lines: quantities
                .iter()
                .enumerate()
                .map(|(n, q)| TransferLine {
                    id: Uuid::new_v4(),
                    product_variant_id: Uuid::new_v4(),
                    product_name: format!("Товар {}", n + 1),
                    unit: "шт".to_string(),
                    quantity_requested: *q,
                })
                .collect(),
        }
    }

    #[test]
    fn test_draft_defaults() {
        let transfer = transfer_with_lines(&[10.0, 5.0]);
        let draft = ReceptionDraft::from_transfer(&transfer);

        assert_eq!(draft.items.len(), 2);
        for item in &draft.items {
            assert_eq!(item.quantity_received, 0.0);
            assert!(item.is_accepted);
            assert!(item.discrepancy_kind.is_none());
        }
        // нули при ненулевом манифесте — завершение заблокировано
        assert!(!draft.validate_completion());
    }

    #[test]
    fn test_short_received_without_flag_blocks_completion() {
        let transfer = transfer_with_lines(&[10.0]);
        let mut draft = ReceptionDraft::from_transfer(&transfer);

        let advisory = draft.update_quantity(0, 7.0);
        assert!(advisory.is_some());
        assert!(!draft.validate_completion());

        draft.toggle_discrepancy(0);
        assert!(draft.validate_completion());
        assert_eq!(
            draft.items[0].discrepancy_kind,
            Some(DiscrepancyKind::MissingQuantity)
        );
    }

    #[test]
    fn test_full_quantity_passes_without_flag() {
        let transfer = transfer_with_lines(&[10.0, 5.0]);
        let mut draft = ReceptionDraft::from_transfer(&transfer);

        assert!(draft.update_quantity(0, 10.0).is_none());
        assert!(draft.update_quantity(1, 6.0).is_none()); // излишек не блокирует
        assert!(draft.validate_completion());
    }

    #[test]
    fn test_toggle_twice_restores_item() {
        let transfer = transfer_with_lines(&[10.0]);
        let mut draft = ReceptionDraft::from_transfer(&transfer);
        draft.update_quantity(0, 10.0);

        let before = draft.items[0].clone();
        draft.toggle_discrepancy(0);
        assert!(!draft.items[0].is_accepted);
        assert!(draft.is_flagged(draft.items[0].transfer_item_id));

        draft.toggle_discrepancy(0);
        assert_eq!(draft.items[0], before);
        assert!(!draft.is_flagged(draft.items[0].transfer_item_id));
    }

    #[test]
    fn test_advisory_not_emitted_when_flagged() {
        let transfer = transfer_with_lines(&[10.0]);
        let mut draft = ReceptionDraft::from_transfer(&transfer);

        draft.toggle_discrepancy(0);
        assert!(draft.update_quantity(0, 3.0).is_none());
    }

    #[test]
    fn test_negative_quantity_clamped() {
        let transfer = transfer_with_lines(&[10.0]);
        let mut draft = ReceptionDraft::from_transfer(&transfer);

        draft.update_quantity(0, -4.0);
        assert_eq!(draft.items[0].quantity_received, 0.0);
    }

    #[test]
    fn test_kind_and_notes_only_when_flagged() {
        let transfer = transfer_with_lines(&[10.0]);
        let mut draft = ReceptionDraft::from_transfer(&transfer);

        draft.set_discrepancy_kind(0, DiscrepancyKind::Damaged);
        draft.set_discrepancy_notes(0, "мятая коробка".to_string());
        assert!(draft.items[0].discrepancy_kind.is_none());
        assert!(draft.items[0].discrepancy_notes.is_empty());

        draft.toggle_discrepancy(0);
        draft.set_discrepancy_kind(0, DiscrepancyKind::Damaged);
        draft.set_discrepancy_notes(0, "мятая коробка".to_string());
        assert_eq!(draft.items[0].discrepancy_kind, Some(DiscrepancyKind::Damaged));
        assert_eq!(draft.items[0].discrepancy_notes, "мятая коробка");
    }

    #[test]
    fn test_unexpected_product_validation() {
        let transfer = transfer_with_lines(&[1.0]);
        let mut draft = ReceptionDraft::from_transfer(&transfer);

        let bad = UnexpectedProduct {
            product_name: "  ".to_string(),
            quantity: 1.0,
            unit: "шт".to_string(),
            batch_number: None,
            observations: None,
        };
        assert!(draft.add_unexpected(bad).is_err());

        let zero = UnexpectedProduct {
            product_name: "Галета".to_string(),
            quantity: 0.0,
            unit: "шт".to_string(),
            batch_number: None,
            observations: None,
        };
        assert!(draft.add_unexpected(zero).is_err());

        let ok = UnexpectedProduct {
            product_name: "Галета".to_string(),
            quantity: 2.0,
            unit: "шт".to_string(),
            batch_number: Some("П-77".to_string()),
            observations: None,
        };
        assert!(draft.add_unexpected(ok).is_ok());
        assert_eq!(draft.unexpected.len(), 1);

        draft.remove_unexpected(0);
        assert!(draft.unexpected.is_empty());
    }

    #[test]
    fn test_discrepancy_report_matches_server_ids_and_templates_notes() {
        use crate::domain::a003_transfer_reception::aggregate::{
            ReceptionItem, TransferReception, TransferReceptionId,
        };
        use crate::enums::reception_status::ReceptionStatus;

        let transfer = transfer_with_lines(&[10.0, 5.0]);
        let mut draft = ReceptionDraft::from_transfer(&transfer);
        draft.update_quantity(0, 7.0);
        draft.toggle_discrepancy(0);
        draft.update_quantity(1, 5.0);

        // серверное эхо: строки получили собственные id
        let reception = TransferReception {
            base: BaseAggregate::new(
                TransferReceptionId::new(Uuid::new_v4()),
                "ПРМ-000001".to_string(),
                "Приёмка ПЕР-000001".to_string(),
            ),
            transfer_id: transfer.base.id,
            status: ReceptionStatus::WithDiscrepancies,
            is_discrepancy_resolved: false,
            items: draft
                .items
                .iter()
                .map(|d| ReceptionItem {
                    id: Uuid::new_v4(),
                    transfer_item_id: d.transfer_item_id,
                    product_variant_id: d.product_variant_id,
                    product_name: d.product_name.clone(),
                    unit: d.unit.clone(),
                    quantity_requested: d.quantity_requested,
                    quantity_received: d.quantity_received,
                    received_batch: None,
                    received_expiry_date: None,
                    discrepancy_kind: d.discrepancy_kind,
                    discrepancy_notes: d.discrepancy_notes.clone(),
                    resolution_notes: None,
                    is_accepted: d.is_accepted,
                })
                .collect(),
            evidence_urls: Vec::new(),
            comments: Vec::new(),
        };

        let report = draft.to_discrepancy_report(&reception).unwrap();
        assert_eq!(report.items.len(), 1);
        assert_eq!(report.items[0].transfer_reception_item_id, reception.items[0].id);
        // пустые примечания заменяются шаблоном
        assert!(report.items[0].discrepancy_notes.contains("Недостача"));

        // без расхождений второй вызов не собирается
        let clean = ReceptionDraft::from_transfer(&transfer);
        assert!(clean.to_discrepancy_report(&reception).is_none());
    }

    #[test]
    fn test_receive_request_excludes_unexpected() {
        let transfer = transfer_with_lines(&[10.0]);
        let mut draft = ReceptionDraft::from_transfer(&transfer);
        draft.update_quantity(0, 10.0);
        draft
            .add_unexpected(UnexpectedProduct {
                product_name: "Галета".to_string(),
                quantity: 2.0,
                unit: "шт".to_string(),
                batch_number: None,
                observations: None,
            })
            .unwrap();

        let request = draft.to_receive_request(Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(request.items.len(), 1);
        assert_eq!(request.items[0].quantity_received, 10.0);
        assert!(request.items[0].is_accepted);
    }
}
