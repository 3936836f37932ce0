//! API layer мастера приёмки: все вызовы к записи приёмки (a003)

use crate::shared::api_utils::api_base;
use contracts::domain::a003_transfer_reception::aggregate::{ReceptionComment, TransferReception};
use contracts::usecases::u101_receive_transfer::request::{
    AddCommentRequest, ReceiveTransferRequest, ReportDiscrepanciesRequest,
    ResolveReceptionRequest, UploadEvidenceResponse,
};
use gloo_net::http::Request;

/// Создать запись приёмки по черновику
pub async fn receive_transfer(
    request: &ReceiveTransferRequest,
) -> Result<TransferReception, String> {
    let url = format!("{}/api/a003/receptions", api_base());
    let response = Request::post(&url)
        .json(request)
        .map_err(|e| format!("Ошибка сериализации: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Ошибка сети: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Ошибка парсинга: {}", e))
}

/// Зарегистрировать пакет расхождений по созданной приёмке
pub async fn report_discrepancies(
    reception_id: &str,
    request: &ReportDiscrepanciesRequest,
) -> Result<(), String> {
    let url = format!(
        "{}/api/a003/receptions/{}/discrepancies",
        api_base(),
        reception_id
    );
    let response = Request::post(&url)
        .json(request)
        .map_err(|e| format!("Ошибка сериализации: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Ошибка сети: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    Ok(())
}

/// Завершить урегулирование расхождений (только склад-отправитель)
pub async fn resolve_reception(
    reception_id: &str,
    request: &ResolveReceptionRequest,
) -> Result<(), String> {
    let url = format!("{}/api/a003/receptions/{}/resolve", api_base(), reception_id);
    let response = Request::post(&url)
        .json(request)
        .map_err(|e| format!("Ошибка сериализации: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Ошибка сети: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    Ok(())
}

/// Добавить комментарий к приёмке
pub async fn add_comment(
    reception_id: &str,
    request: &AddCommentRequest,
) -> Result<ReceptionComment, String> {
    let url = format!(
        "{}/api/a003/receptions/{}/comments",
        api_base(),
        reception_id
    );
    let response = Request::post(&url)
        .json(request)
        .map_err(|e| format!("Ошибка сериализации: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Ошибка сети: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Ошибка парсинга: {}", e))
}

/// Загрузить подтверждающие материалы (фото, документы).
///
/// Ответ сервера исторически нестабилен по форме, поэтому разбирается
/// в `UploadEvidenceResponse`; при нераспознанной форме вызывающая
/// сторона перечитывает запись приёмки целиком.
pub async fn upload_evidence(
    reception_id: &str,
    files: &[web_sys::File],
) -> Result<UploadEvidenceResponse, String> {
    use wasm_bindgen::JsCast;
    use web_sys::{FormData, Request as WebRequest, RequestInit, RequestMode, Response};

    let form_data = FormData::new().map_err(|e| format!("{e:?}"))?;
    for file in files {
        form_data
            .append_with_blob("files", file)
            .map_err(|e| format!("{e:?}"))?;
    }

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&form_data);

    let url = format!(
        "{}/api/a003/receptions/{}/evidence",
        api_base(),
        reception_id
    );
    let request = WebRequest::new_with_str_and_init(&url, &opts).map_err(|e| format!("{e:?}"))?;

    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    let resp_value = wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("{e:?}"))?;
    let resp: Response = resp_value.dyn_into().map_err(|e| format!("{e:?}"))?;

    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }

    let text = wasm_bindgen_futures::JsFuture::from(resp.text().map_err(|e| format!("{e:?}"))?)
        .await
        .map_err(|e| format!("{e:?}"))?;
    let text: String = text.as_string().ok_or_else(|| "bad text".to_string())?;
    serde_json::from_str(&text).map_err(|e| format!("Ошибка парсинга: {}", e))
}

/// Перечитать запись приёмки (ресинхронизация после неоднозначного
/// ответа загрузки)
pub async fn fetch_reception(reception_id: &str) -> Result<TransferReception, String> {
    let url = format!("{}/api/a003/receptions/{}", api_base(), reception_id);
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Ошибка сети: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Ошибка парсинга: {}", e))
}

/// Найти запись приёмки по перемещению (None — приёмка ещё не создана)
pub async fn fetch_reception_by_transfer(
    transfer_id: &str,
) -> Result<Option<TransferReception>, String> {
    let url = format!(
        "{}/api/a003/receptions/by-transfer/{}",
        api_base(),
        transfer_id
    );
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Ошибка сети: {}", e))?;

    if response.status() == 404 {
        return Ok(None);
    }
    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    response
        .json()
        .await
        .map(Some)
        .map_err(|e| format!("Ошибка парсинга: {}", e))
}
