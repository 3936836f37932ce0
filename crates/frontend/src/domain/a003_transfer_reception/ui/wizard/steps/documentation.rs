//! Шаг 3 «Документация»: подтверждающие материалы и итог приёмки.

use super::super::view_model::ReceptionWizardVm;
use super::comments::CommentsThread;
use contracts::enums::comment_kind::CommentKind;
use contracts::enums::reception_status::ReceptionStatus;
use leptos::html;
use leptos::prelude::*;
use thaw::*;

fn status_badge(status: ReceptionStatus) -> (&'static str, &'static str) {
    match status {
        ReceptionStatus::Received => ("badge badge--success", "Принято"),
        ReceptionStatus::WithDiscrepancies => ("badge badge--warning", "С расхождениями"),
        ReceptionStatus::Resolved => ("badge badge--success", "Урегулировано"),
    }
}

#[component]
pub fn DocumentationStep(vm: ReceptionWizardVm) -> impl IntoView {
    let file_input: NodeRef<html::Input> = NodeRef::new();

    let upload = move |_| {
        let Some(input) = file_input.get_untracked() else {
            return;
        };
        let Some(list) = input.files() else {
            return;
        };
        let files: Vec<web_sys::File> = (0..list.length()).filter_map(|i| list.get(i)).collect();
        if files.is_empty() {
            vm.notice.set(Some("Выберите файлы для загрузки".to_string()));
            return;
        }
        vm.upload_files(files);
        input.set_value("");
    };

    view! {
        <Card>
            <h2>"Итог приёмки"</h2>
            {move || {
                vm.reception
                    .get()
                    .map(|r| {
                        let (badge, label) = status_badge(r.status);
                        let open = r.status.has_open_discrepancies() && !r.is_discrepancy_resolved;
                        view! {
                            <Flex gap=FlexGap::Medium style="align-items:center;">
                                <span class=badge>{label}</span>
                                <span>{format!("Строк: {}", r.items.len())}</span>
                                <span>
                                    {format!(
                                        "Расхождений: {}",
                                        r.items.iter().filter(|i| !i.is_accepted).count(),
                                    )}
                                </span>
                                {open
                                    .then(|| {
                                        view! {
                                            <span class="hint">
                                                "Остались неурегулированные расхождения"
                                            </span>
                                        }
                                    })}
                            </Flex>
                        }
                    })
            }}
        </Card>

        <Card attr:style="margin-top:var(--spacing-md);">
            <h2>"Подтверждающие материалы"</h2>

            {move || {
                let urls = vm
                    .reception
                    .with(|r| r.as_ref().map(|r| r.evidence_urls.clone()).unwrap_or_default());
                if urls.is_empty() {
                    return view! { <p class="hint">"Материалы не загружены"</p> }.into_any();
                }
                view! {
                    <ul class="evidence-list">
                        {urls
                            .into_iter()
                            .map(|url| {
                                view! {
                                    <li>
                                        <a href=url.clone() target="_blank" rel="noopener">
                                            {url.clone()}
                                        </a>
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                }
                .into_any()
            }}

            <Flex gap=FlexGap::Small style="margin-top:var(--spacing-sm);align-items:center;">
                <input type="file" multiple node_ref=file_input />
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(move || vm.upload_op.is_pending())
                    on_click=upload
                >
                    {move || if vm.upload_op.is_pending() { "Загрузка..." } else { "Загрузить" }}
                </Button>
            </Flex>
        </Card>

        <Card attr:style="margin-top:var(--spacing-md);">
            <CommentsThread vm=vm kind=CommentKind::General />
        </Card>
    }
}
