use crate::models::pagination::PagerAction;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// One button per row, or `None` when there is nothing to page to.
pub fn pager_keyboard(actions: &[PagerAction]) -> Option<InlineKeyboardMarkup> {
    if actions.is_empty() {
        return None;
    }

    let rows: Vec<Vec<InlineKeyboardButton>> = actions
        .iter()
        .map(|action| {
            vec![InlineKeyboardButton::callback(
                action.label(),
                action.to_string(),
            )]
        })
        .collect();

    Some(InlineKeyboardMarkup::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::InlineKeyboardButtonKind;

    #[test]
    fn no_keyboard_without_actions() {
        assert!(pager_keyboard(&[]).is_none());
    }

    #[test]
    fn buttons_carry_target_page() {
        let keyboard = pager_keyboard(&[PagerAction::Prev(1), PagerAction::Next(3)]).unwrap();
        let buttons: Vec<(String, String)> = keyboard
            .inline_keyboard
            .iter()
            .map(|row| {
                assert_eq!(row.len(), 1);
                let button = &row[0];
                let data = match &button.kind {
                    InlineKeyboardButtonKind::CallbackData(data) => data.clone(),
                    other => panic!("unexpected button kind: {:?}", other),
                };
                (button.text.clone(), data)
            })
            .collect();

        assert_eq!(
            buttons,
            vec![
                ("Previous".to_string(), "prev_1".to_string()),
                ("Next".to_string(), "next_3".to_string()),
            ]
        );
    }
}
