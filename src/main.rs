use yew_infinite_tictactoe::components::app::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
