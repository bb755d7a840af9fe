use axum::response::Html;

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Welcome page HTML", content_type = "text/html")
    ),
    tag = "General"
)]
pub async fn root() -> Html<&'static str> {
    Html(r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <meta charset="UTF-8">
            <title>Pagination Kit</title>
            <style>
                body {
                    display: flex;
                    flex-direction: column;
                    justify-content: center;
                    align-items: center;
                    height: 100vh;
                    margin: 0;
                    font-family: Arial, sans-serif;
                }
                code {
                    color: #007bff;
                }
            </style>
        </head>
        <body>
            <h1>Pagination Kit</h1>
            <p>Every listing answers with <code>x-pagination-first</code>, <code>x-pagination-last</code>,
               <code>x-pagination-previous</code>, <code>x-pagination-next</code> and <code>x-pagination-count</code>.</p>
            <p>Try <a href="/files?page=0&amp;limit=10">/files</a> or <a href="/projects">/projects</a>.</p>
            <a href="/swagger-ui/">Explore API Docs</a>
        </body>
        </html>
    "#)
}
