//! Лента комментариев записи приёмки.

use super::super::view_model::ReceptionWizardVm;
use crate::shared::date_utils::format_datetime;
use contracts::enums::comment_kind::CommentKind;
use leptos::prelude::*;
use thaw::*;

/// Лента комментариев с формой отправки.
///
/// `kind` определяет тип, с которым будет создан новый комментарий;
/// лента показывает комментарии всех типов в хронологическом порядке.
#[component]
pub fn CommentsThread(vm: ReceptionWizardVm, kind: CommentKind) -> impl IntoView {
    view! {
        <div class="comments">
            <h3>"Комментарии"</h3>

            {move || {
                let comments = vm
                    .reception
                    .with(|r| r.as_ref().map(|r| r.comments.clone()).unwrap_or_default());
                if comments.is_empty() {
                    return view! {
                        <p class="comments__empty">"Комментариев пока нет"</p>
                    }
                    .into_any();
                }
                comments
                    .into_iter()
                    .map(|c| {
                        let badge = match c.kind {
                            CommentKind::Discrepancy => "badge badge--warning",
                            CommentKind::General => "badge",
                        };
                        view! {
                            <div class="comment">
                                <div class="comment__meta">
                                    <strong>{c.author}</strong>
                                    <span class=badge>{c.kind.display_name()}</span>
                                    <span class="comment__date">
                                        {format_datetime(&c.created_at.to_rfc3339())}
                                    </span>
                                </div>
                                <div class="comment__body">{c.message}</div>
                            </div>
                        }
                        .into_any()
                    })
                    .collect_view()
                    .into_any()
            }}

            <Flex gap=FlexGap::Small style="margin-top:var(--spacing-sm);">
                <input
                    type="text"
                    style="flex:1;"
                    placeholder="Новый комментарий"
                    prop:value=move || vm.comment_text.get()
                    on:input=move |ev| vm.comment_text.set(event_target_value(&ev))
                />
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(move || vm.comment_op.is_pending())
                    on_click=move |_| vm.send_comment(kind)
                >
                    {move || {
                        if vm.comment_op.is_pending() {
                            "Отправка..."
                        } else {
                            "Отправить"
                        }
                    }}
                </Button>
            </Flex>
        </div>
    }
}
