use crate::success;

pub async fn logout() {
    let session = super::new_session();
    session.logout().await;
    success!("Successfully logged out");
}
