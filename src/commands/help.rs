const WELCOME: &str = "\
Hello! I am a YouTube Downloader Bot. 🤖

Send me any YouTube link, and I will download it as MP3 (Audio) or MP4 (Video) for you.

/status: bot status
/cookie_status: check the cookies file";

pub fn welcome() -> String {
    WELCOME.to_string()
}
