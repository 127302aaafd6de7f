mod csharp;
mod php;
