use super::map_view::MapView;
use crate::config::MapConfig;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    // Tuning overrides are read once per page load
    let config = use_memo((), |_| MapConfig::load());
    html! { <MapView config={(*config).clone()} /> }
}
