use super::{board_view::BoardView, settings_modal::SettingsModal};
use crate::settings::Settings;
use crate::util::{clog, cwarn};
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let settings = use_state(Settings::load_or_default);
    let show_settings = use_state(|| false);

    // Persist settings changes
    use_effect_with(*settings, move |s| {
        match s.save() {
            Ok(()) => clog(&format!("settings saved: {:?}", s)),
            Err(e) => cwarn(&format!("settings not saved: {e}")),
        }
        || ()
    });

    let open_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_| show_settings.set(true))
    };
    let close_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_| show_settings.set(false))
    };
    let change_settings = {
        let settings = settings.clone();
        Callback::from(move |s: Settings| settings.set(s))
    };

    html! {
        <div id="root">
            <BoardView settings={*settings} on_open_settings={open_settings} />
            <SettingsModal
                show={*show_settings}
                settings={*settings}
                on_change={change_settings}
                on_close={close_settings}
            />
        </div>
    }
}
