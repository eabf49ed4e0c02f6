fn main() {
    comment_shooter::run();
}
