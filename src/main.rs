fn main() {
    topdown_shooter::game::run();
}
