//! Line-oriented shell around the application controller. All behavior
//! lives in the library; this file parses commands and prints state.

use std::path::PathBuf;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use somshare_app::board::Scope;
use somshare_app::nav::Screen;
use somshare_app::{AppConfig, AppController};
use somshare_types::api::{HistoryKind, PostUpdateRequest};
use somshare_types::catalog;
use somshare_types::models::Rating;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "somshare=info,somshare_client=info,somshare_app=info".into()),
        )
        .init();

    let config = AppConfig::from_env();
    let mut app = AppController::new(config);

    if app.resume().await {
        if let Some(profile) = app.session.profile() {
            println!("{}님, 환영합니다! (보유 포인트 {}P)", profile.nickname, profile.points);
        }
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout
            .write_all(format!("[{}] > ", app.screen.title()).as_bytes())
            .await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let args: Vec<&str> = line.split_whitespace().collect();
        let Some(&cmd) = args.first() else { continue };

        let result = dispatch(&mut app, cmd, &args[1..]).await;
        match result {
            Ok(Output::Text(msg)) => println!("{}", msg),
            Ok(Output::Quit) => break,
            Err(e) => println!("! {}", e),
        }
    }

    Ok(())
}

enum Output {
    Text(String),
    Quit,
}

async fn dispatch(app: &mut AppController, cmd: &str, args: &[&str]) -> Result<Output> {
    use Output::Text;

    match cmd {
        "quit" | "exit" => return Ok(Output::Quit),
        "help" => return Ok(Text(HELP.to_string())),
        "go" => {
            let screen = parse_screen(args.first().copied().unwrap_or(""))?;
            app.navigate(screen);
            return Ok(Text(format!("→ {}", screen.title())));
        }
        _ => {}
    }

    let out = match cmd {
        "verify" => {
            let email = arg(args, 0, "verify <email>")?;
            app.send_verification(email).await?
        }
        "code" => {
            let email = arg(args, 0, "code <email> <code>")?;
            let code = arg(args, 1, "code <email> <code>")?;
            app.verify_code(email, code).await?
        }
        "signup" => {
            let email = arg(args, 0, "signup <email> <pw> <pw-confirm>")?;
            let pw = arg(args, 1, "signup <email> <pw> <pw-confirm>")?;
            let confirm = arg(args, 2, "signup <email> <pw> <pw-confirm>")?;
            app.signup(email, pw, confirm).await?
        }
        "profile" => {
            let nickname = arg(args, 0, "profile <nickname> <college> <major> [image]")?;
            let college = arg(args, 1, "profile <nickname> <college> <major> [image]")?;
            let major = arg(args, 2, "profile <nickname> <college> <major> [image]")?;
            let image = args.get(3).map(PathBuf::from);
            app.setup_profile(nickname, college, major, image).await?
        }
        "login" => {
            let email = arg(args, 0, "login <email> <password>")?;
            let pw = arg(args, 1, "login <email> <password>")?;
            app.login(email, pw).await?
        }
        "logout" => {
            app.logout().await;
            "로그아웃되었습니다.".to_string()
        }
        "list" => {
            app.board.filter.search = None;
            app.board.filter.scope = Scope::All;
            let n = app.refresh_board().await?;
            render_board(app, n)
        }
        "search" => {
            app.board.filter.search = Some(args.join(" "));
            let n = app.refresh_board().await?;
            render_board(app, n)
        }
        "major" => {
            let code = arg(args, 0, "major <major-code>")?;
            app.board.filter.scope = Scope::Major(code.to_string());
            let n = app.refresh_board().await?;
            render_board(app, n)
        }
        "college" => {
            let name = args.join(" ");
            app.board.filter.scope = Scope::College(name);
            let n = app.refresh_board().await?;
            render_board(app, n)
        }
        "majors" => catalog::COLLEGES
            .iter()
            .map(|c| {
                let codes: Vec<&str> = c.majors.iter().map(|m| m.code).collect();
                format!("{}: {}", c.name, codes.join(", "))
            })
            .collect::<Vec<_>>()
            .join("\n"),
        "download" => {
            let id: i64 = arg(args, 0, "download <post-id>")?.parse()?;
            let report = app.download(id).await?;
            match report.saved_to {
                Some(path) => format!("{} → {}", report.message, path.display()),
                None => format!("{} (URL: {})", report.message, report.pdf_url),
            }
        }
        "rate" => {
            let id: i64 = arg(args, 0, "rate <post-id> like|dislike")?.parse()?;
            let rating = match arg(args, 1, "rate <post-id> like|dislike")? {
                "like" => Rating::Like,
                "dislike" => Rating::Dislike,
                other => anyhow::bail!("알 수 없는 평가: {}", other),
            };
            let resp = app.rate(id, rating).await?;
            format!("👍 {}  👎 {}", resp.like_count, resp.dislike_count)
        }
        "upload" => {
            let file = arg(args, 0, "upload <file> <title> <subject> <professor> <major>")?;
            app.uploader.form.file = Some(PathBuf::from(file));
            app.uploader.form.title = arg(args, 1, "upload: 제목이 필요해요")?.to_string();
            app.uploader.form.subject = arg(args, 2, "upload: 과목명이 필요해요")?.to_string();
            app.uploader.form.professor = arg(args, 3, "upload: 교수명이 필요해요")?.to_string();
            app.uploader.form.major = arg(args, 4, "upload: 전공이 필요해요")?.to_string();
            app.submit_upload().await?
        }
        "points" => {
            let view = app.ledger(HistoryKind::All).await?;
            let totals = view.totals();
            format!(
                "보유 {}P (획득 +{}P / 사용 -{}P, 최근 {}건)",
                view.balance,
                totals.earned,
                totals.spent,
                view.entries.len()
            )
        }
        "edit" => {
            let id: i64 = arg(args, 0, "edit <post-id> <제목> <과목> <교수> <전공>")?.parse()?;
            let update = PostUpdateRequest {
                title: arg(args, 1, "edit: 제목이 필요해요")?.to_string(),
                subject: arg(args, 2, "edit: 과목명이 필요해요")?.to_string(),
                professor: arg(args, 3, "edit: 교수명이 필요해요")?.to_string(),
                major: arg(args, 4, "edit: 전공이 필요해요")?.to_string(),
            };
            app.client.update_post(id, &update).await?.message
        }
        "delete" => {
            let id: i64 = arg(args, 0, "delete <post-id>")?.parse()?;
            app.client.delete_post(id).await?;
            "족보가 삭제되었습니다.".to_string()
        }
        "mypage" => {
            let (uploads, downloads) = app.my_activity().await?;
            let mut out = format!(
                "올린 족보 {}건 / 받은 족보 {}건",
                uploads.len(),
                downloads.len()
            );
            for e in &uploads {
                out.push_str(&format!("\n↑ #{} {} ({}, +{}P)", e.id, e.title, e.date, e.points));
            }
            for e in &downloads {
                out.push_str(&format!("\n↓ #{} {} ({}, -{}P)", e.id, e.title, e.date, e.points));
            }
            out
        }
        "me" => match app.session.profile() {
            Some(p) => format!("{} <{}> {} {} · {}P", p.nickname, p.email, p.college, p.major, p.points),
            None => "로그인되어 있지 않습니다.".to_string(),
        },
        other => format!("알 수 없는 명령: {} (help 참고)", other),
    };

    Ok(Text(out))
}

fn render_board(app: &AppController, fetched: usize) -> String {
    let visible = app.board.visible();
    let mut out = format!("총 {}개의 족보 (서버 {}건)\n", visible.len(), fetched);
    for post in &visible {
        out.push_str(&format!(
            "#{} [{}] {} / {} / {} · {}P, ↓{}회, 👍{} 👎{}\n",
            post.id,
            catalog::major_label(&post.major).unwrap_or(&post.major),
            post.title,
            post.subject,
            post.professor,
            app.display_cost(post),
            post.download_count,
            post.like_count,
            post.dislike_count,
        ));
    }
    out.pop();
    out
}

fn parse_screen(name: &str) -> Result<Screen> {
    Ok(match name {
        "login" => Screen::Login,
        "signup" => Screen::Signup,
        "profile" => Screen::ProfileSetup,
        "home" => Screen::Home,
        "board" => Screen::Board,
        "upload" => Screen::Upload,
        "mypage" => Screen::MyPage,
        other => anyhow::bail!("알 수 없는 화면: {}", other),
    })
}

fn arg<'a>(args: &[&'a str], idx: usize, usage: &str) -> Result<&'a str> {
    args.get(idx)
        .copied()
        .ok_or_else(|| anyhow::anyhow!("사용법: {}", usage))
}

const HELP: &str = "\
verify <email>                        학교 이메일 인증 메일 발송
code <email> <code>                   인증 코드 확인
signup <email> <pw> <pw-confirm>      회원가입
profile <닉네임> <대학> <전공> [이미지]  프로필 설정
login <email> <password>              로그인
logout                                로그아웃
list | search <검색어> | major <코드> | college <대학명>
majors                                전공 코드 목록
download <post-id>                    족보 다운로드 (포인트 차감)
rate <post-id> like|dislike           평가 토글
upload <file> <제목> <과목> <교수> <전공>
edit <post-id> <제목> <과목> <교수> <전공>  내 족보 수정
delete <post-id>                      내 족보 삭제
points                                포인트 현황
mypage                                올린/받은 족보 내역
me                                    내 정보
go <화면> / help / quit";
