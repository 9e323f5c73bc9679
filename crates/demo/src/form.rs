//! The demo application: a page with a small form on GET, an echo of the posted body on POST.

use std::error::Error;

use async_trait::async_trait;
use http_body_util::BodyExt;
use plain_http::connection::ResponseWriter;
use plain_http::handler::Handler;
use plain_http::protocol::RequestHead;
use plain_http::protocol::body::ReqBody;
use tokio::io::AsyncWrite;
use tracing::info;

#[derive(Debug, Default)]
pub struct FormHandler;

#[async_trait]
impl Handler for FormHandler {
    type Error = Box<dyn Error + Send + Sync>;

    async fn handle_get<W>(&self, request: &RequestHead, response: &mut ResponseWriter<W>) -> Result<(), Self::Error>
    where
        W: AsyncWrite + Unpin + Send,
    {
        info!(url = request.target(), "GET request");

        let page = format!(
            "<html><body><h1>test server</h1>\n\
             Current Time: {}\n\
             url : {}\n\
             <form method=post action=/form>\n\
             <input type=text name=foo value=foovalue>\n\
             <input type=submit name=bar value=barvalue>\n\
             </form>\n",
            current_time(),
            request.target()
        );

        response.write_html_success()?;
        response.write_body(page).await?;
        Ok(())
    }

    async fn handle_post<W>(&self, request: &RequestHead, body: ReqBody, response: &mut ResponseWriter<W>) -> Result<(), Self::Error>
    where
        W: AsyncWrite + Unpin + Send,
    {
        info!(url = request.target(), "POST request");
        let data = body.collect().await?.to_bytes();

        let page = format!(
            "<html><body><h1>test server</h1>\n\
             <a href=/test>return</a><p>\n\
             postbody: <pre>{}</pre>\n",
            String::from_utf8_lossy(&data)
        );

        response.write_html_success()?;
        response.write_body(page).await?;
        Ok(())
    }
}

fn current_time() -> String {
    let mut buf = faf_http_date::get_date_buff_no_key();
    faf_http_date::get_date_no_key(&mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}
