use crate::views;

pub async fn status() {
    let session = super::new_session();
    super::restore(&session).await;

    let state = session.state();
    if !state.is_authenticated() {
        println!("{}", views::login::render(&state));
        return;
    }

    let pb = super::spinner("Testing backend connection...");
    let healthy = session.gateway().backend_healthy().await;
    pb.finish_and_clear();

    println!("{}", views::dashboard::render(&state, Some(healthy)));
}
